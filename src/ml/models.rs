use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse confidence bucket derived from the classifier probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    /// High when the probability sits far from the decision boundary:
    /// above 0.7 or below 0.3, both exclusive.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 || probability < 0.3 {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "High"),
            Confidence::Medium => write!(f, "Medium"),
        }
    }
}

/// The assembled impact estimate for one incident
///
/// Field names are a wire contract; do not rename them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Classifier positive-class probability, [0, 1]
    pub high_impact_probability: f64,

    /// Classifier hard label (its own threshold decision, not necessarily
    /// consistent with the probability at 0.5)
    pub high_impact_prediction: u8,

    /// Regressor output clamped to be non-negative
    pub predicted_delay_minutes: f64,

    /// Derived affected distance, capped at 10 miles
    pub impact_radius_miles: f64,

    /// Confidence bucket
    pub confidence: Confidence,

    /// Classifier identifying label
    pub classifier_name: String,

    /// Regressor identifying label
    pub regressor_name: String,

    /// Training provenance, passed through unmodified when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TrainingMetadata>,
}

/// Training provenance recorded alongside the model artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub model_type: String,

    pub n_features: usize,

    pub features: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_metrics: Option<ClassificationMetrics>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regression_metrics: Option<RegressionMetrics>,

    pub training_samples: usize,

    pub test_samples: usize,

    pub training_date: chrono::DateTime<chrono::Utc>,

    /// Any extra keys the training pipeline recorded
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub f1_score: f64,
    pub roc_auc: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}
