use crate::error::{AppError, Result};
use crate::ml::features::{self, IncidentParams};
use crate::ml::models::{Confidence, PredictionResult};
use crate::ml::radius::estimate_impact_radius;
use crate::ml::registry::ModelRegistry;
use std::sync::Arc;
use tracing::debug;

/// Impact prediction pipeline
///
/// Stateless orchestration over the loaded registry: build the feature
/// vector, score both models, derive the radius, assemble the result. Safe
/// to call concurrently; the registry is read-only after load.
pub struct ImpactPredictor {
    registry: Arc<ModelRegistry>,
}

impl ImpactPredictor {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Predict the impact of one incident
    ///
    /// The result is a pure function of the parameters and the loaded model
    /// state; repeated calls return identical values. Errors are
    /// unrecoverable for the call: no partial results.
    pub fn predict(&self, params: &IncidentParams) -> Result<PredictionResult> {
        let schema = self.registry.schema();
        let vector = schema.build_vector(params);

        // Non-finite values would propagate NaN through both models; reject
        // them before scoring.
        for (name, value) in schema.names().iter().zip(&vector) {
            if !value.is_finite() {
                return Err(AppError::InvalidFeature(format!(
                    "feature '{}' is {}",
                    name, value
                )));
            }
        }

        // Two independent classifier calls: the hard label comes from the
        // model's own threshold, not from comparing the probability to 0.5.
        let classifier = self.registry.classifier();
        let high_impact_probability = classifier.predict_probability(&vector)?;
        let high_impact_prediction = classifier.predict_label(&vector)?;

        let regressor = self.registry.regressor();
        let predicted_delay_minutes = regressor.predict_delay(&vector)?.max(0.0);

        let blocking = params
            .get(features::BLOCKING_ENCODED)
            .copied()
            .unwrap_or(0.0);
        let incident_type = params
            .get(features::INCIDENT_TYPE_ENCODED)
            .copied()
            .unwrap_or(0.0);
        let impact_radius_miles =
            estimate_impact_radius(predicted_delay_minutes, blocking, incident_type);

        let confidence = Confidence::from_probability(high_impact_probability);

        debug!(
            probability = high_impact_probability,
            label = high_impact_prediction,
            delay_minutes = predicted_delay_minutes,
            radius_miles = impact_radius_miles,
            "Impact prediction computed"
        );

        Ok(PredictionResult {
            high_impact_probability,
            high_impact_prediction,
            predicted_delay_minutes,
            impact_radius_miles,
            confidence,
            classifier_name: classifier.name().to_string(),
            regressor_name: regressor.name().to_string(),
            metadata: self.registry.metadata().cloned(),
        })
    }
}
