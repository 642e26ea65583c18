pub mod api;
pub mod config;
pub mod corridor;
pub mod error;
pub mod ml;
pub mod models;

pub use error::{AppError, Result};
