//! Impact prediction pipeline
//!
//! This module turns a named incident-parameter record into a structured
//! impact estimate:
//! - Fixed-order feature-vector assembly against the model feature schema
//! - Opaque scoring through the trained classifier and regressor
//! - Deterministic impact-radius derivation
//! - Result assembly with confidence label and training metadata
pub mod classifier;
pub mod features;
pub mod models;
pub mod radius;
pub mod registry;
pub mod regressor;
pub mod service;

pub use classifier::{ImpactClassifier, LogisticClassifierArtifact};
pub use features::{FeatureSchema, IncidentParams};
pub use models::{
    ClassificationMetrics, Confidence, PredictionResult, RegressionMetrics, TrainingMetadata,
};
pub use radius::estimate_impact_radius;
pub use registry::ModelRegistry;
pub use regressor::{DelayRegressor, LinearRegressorArtifact};
pub use service::ImpactPredictor;
