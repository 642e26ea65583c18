pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::{corridor::CorridorMap, ml::ImpactPredictor};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<ImpactPredictor>,
    pub corridor: Arc<CorridorMap>,
}

impl AppState {
    pub fn new(predictor: Arc<ImpactPredictor>, corridor: Arc<CorridorMap>) -> Self {
        Self {
            predictor,
            corridor,
        }
    }
}
