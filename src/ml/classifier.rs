use crate::error::{AppError, Result};
use ndarray::aview1;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capability interface for the trained high-impact classifier
///
/// Exposes exactly the operations the pipeline uses. The probability and the
/// label are two independent queries: the model owns its decision threshold,
/// which need not be 0.5, so the label must not be re-derived from the
/// probability by callers.
pub trait ImpactClassifier: Send + Sync {
    /// Positive-class probability in [0, 1]
    fn predict_probability(&self, features: &[f64]) -> Result<f64>;

    /// Hard 0/1 label using the model's own threshold
    fn predict_label(&self, features: &[f64]) -> Result<u8>;

    /// Identifying label supplied by the artifact, not reflection
    fn name(&self) -> &str;
}

/// Logistic classifier loaded from a JSON coefficient artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifierArtifact {
    /// Model name as recorded by the training pipeline
    pub name: String,

    /// Per-feature coefficients, in feature-schema order
    pub weights: Vec<f64>,

    /// Bias term
    pub intercept: f64,

    /// Decision threshold for the hard label
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl LogisticClassifierArtifact {
    /// Load the artifact from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::ModelUnavailable(format!(
                "failed to read classifier artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        let artifact: Self = serde_json::from_str(&text).map_err(|e| {
            AppError::ModelUnavailable(format!(
                "failed to parse classifier artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(artifact)
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    fn decision_value(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(AppError::SchemaMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }
        Ok(aview1(&self.weights).dot(&aview1(features)) + self.intercept)
    }
}

impl ImpactClassifier for LogisticClassifierArtifact {
    fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        let z = self.decision_value(features)?;
        Ok(1.0 / (1.0 + (-z).exp()))
    }

    fn predict_label(&self, features: &[f64]) -> Result<u8> {
        let probability = self.predict_probability(features)?;
        Ok(u8::from(probability >= self.threshold))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
