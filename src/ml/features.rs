use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Named numeric parameters describing one incident
pub type IncidentParams = HashMap<String, f64>;

// Feature names the trained models were fitted on.
pub const HOUR: &str = "hour";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const IS_RUSH_HOUR: &str = "is_rush_hour";
pub const IS_WEEKEND: &str = "is_weekend";
pub const LOCATION_ZONE: &str = "location_zone";
pub const MILEPOST_NORMALIZED: &str = "milepost_normalized";
pub const INCIDENT_TYPE_ENCODED: &str = "incident_type_encoded";
pub const LANE_CLOSURE_ENCODED: &str = "lane_closure_encoded";
pub const DIRECTION_ENCODED: &str = "direction_encoded";
pub const BLOCKING_ENCODED: &str = "blocking_encoded";
pub const SEVERITY_SCORE: &str = "severity_score";
pub const RUSH_BLOCKING_INTERACTION: &str = "rush_blocking_interaction";

pub const KNOWN_FEATURES: &[&str] = &[
    HOUR,
    DAY_OF_WEEK,
    IS_RUSH_HOUR,
    IS_WEEKEND,
    LOCATION_ZONE,
    MILEPOST_NORMALIZED,
    INCIDENT_TYPE_ENCODED,
    LANE_CLOSURE_ENCODED,
    DIRECTION_ENCODED,
    BLOCKING_ENCODED,
    SEVERITY_SCORE,
    RUSH_BLOCKING_INTERACTION,
];

/// Ordered feature-name list defining the exact column order the trained
/// models expect
///
/// The order is load-bearing: it is part of the model artifact, and changing
/// it silently changes model semantics. The schema is immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Load the schema from a JSON array of feature names
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::ModelUnavailable(format!(
                "failed to read feature schema {}: {}",
                path.display(),
                e
            ))
        })?;
        let schema: FeatureSchema = serde_json::from_str(&text).map_err(|e| {
            AppError::ModelUnavailable(format!(
                "failed to parse feature schema {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(schema)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Build a fixed-order feature vector from named parameters
    ///
    /// For each schema name, in order, the vector gets the caller's value or
    /// 0 if the name is absent. Values are passed through as-is; no range or
    /// category validation happens here.
    pub fn build_vector(&self, params: &IncidentParams) -> Vec<f64> {
        self.names
            .iter()
            .map(|name| params.get(name).copied().unwrap_or(0.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            "hour".to_string(),
            "blocking_encoded".to_string(),
            "severity_score".to_string(),
        ])
    }

    #[test]
    fn test_vector_follows_schema_order() {
        let mut params = IncidentParams::new();
        params.insert("severity_score".to_string(), 3.0);
        params.insert("hour".to_string(), 16.0);
        params.insert("blocking_encoded".to_string(), 1.0);

        assert_eq!(schema().build_vector(&params), vec![16.0, 1.0, 3.0]);
    }

    #[test]
    fn test_missing_features_default_to_zero() {
        let mut params = IncidentParams::new();
        params.insert("hour".to_string(), 8.0);

        assert_eq!(schema().build_vector(&params), vec![8.0, 0.0, 0.0]);
    }

    #[test]
    fn test_extra_params_are_ignored() {
        let mut params = IncidentParams::new();
        params.insert("hour".to_string(), 8.0);
        params.insert("not_a_feature".to_string(), 99.0);

        let vector = schema().build_vector(&params);
        assert_eq!(vector.len(), 3);
        assert_eq!(vector[0], 8.0);
    }

    #[test]
    fn test_empty_schema_builds_empty_vector() {
        let schema = FeatureSchema::new(vec![]);
        assert!(schema.is_empty());
        assert!(schema.build_vector(&IncidentParams::new()).is_empty());
    }

    #[test]
    fn test_schema_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feature_list.json");
        std::fs::write(&path, r#"["hour", "day_of_week", "is_rush_hour"]"#).unwrap();

        let schema = FeatureSchema::load(&path).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.names()[2], "is_rush_hour");
    }

    #[test]
    fn test_schema_load_missing_file_is_model_unavailable() {
        let err = FeatureSchema::load(Path::new("/nonexistent/feature_list.json")).unwrap_err();
        assert_eq!(err.error_code(), "MODEL_UNAVAILABLE");
    }
}
