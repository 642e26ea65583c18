use crate::error::{AppError, Result};
use ndarray::aview1;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capability interface for the trained delay regressor
pub trait DelayRegressor: Send + Sync {
    /// Continuous delay estimate in minutes; may be negative, callers clamp
    fn predict_delay(&self, features: &[f64]) -> Result<f64>;

    /// Identifying label supplied by the artifact, not reflection
    fn name(&self) -> &str;
}

/// Linear regressor loaded from a JSON coefficient artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressorArtifact {
    /// Model name as recorded by the training pipeline
    pub name: String,

    /// Per-feature coefficients, in feature-schema order
    pub weights: Vec<f64>,

    /// Bias term
    pub intercept: f64,
}

impl LinearRegressorArtifact {
    /// Load the artifact from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::ModelUnavailable(format!(
                "failed to read regressor artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        let artifact: Self = serde_json::from_str(&text).map_err(|e| {
            AppError::ModelUnavailable(format!(
                "failed to parse regressor artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(artifact)
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }
}

impl DelayRegressor for LinearRegressorArtifact {
    fn predict_delay(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(AppError::SchemaMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }
        Ok(aview1(&self.weights).dot(&aview1(features)) + self.intercept)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
