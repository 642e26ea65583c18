use crate::api::AppState;
use crate::corridor::Milepost;
use crate::error::Result;
use crate::ml::models::{Confidence, TrainingMetadata};
use crate::models::{Direction, IncidentReport, IncidentType, LaneClosure};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Predict the impact of a reported incident
pub async fn predict_impact(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    request.validate()?;

    let report = IncidentReport {
        hour: request.hour,
        day_of_week: request.day_of_week,
        location_zone: request.location_zone,
        milepost_normalized: request.milepost_normalized,
        incident_type: request.incident_type,
        lane_closure: request.lane_closure,
        direction: request.direction,
        blocking: request.blocking,
        severity_score: request.severity_score,
    };

    let result = state.predictor.predict(&report.encode())?;

    let (latitude, longitude) = state
        .corridor
        .coordinates_from_normalized(request.milepost_normalized);
    let approx_milepost = state.corridor.approx_milepost(request.milepost_normalized);

    Ok(Json(PredictResponse {
        high_impact_probability: result.high_impact_probability,
        high_impact_prediction: result.high_impact_prediction,
        predicted_delay_minutes: result.predicted_delay_minutes,
        impact_radius_miles: result.impact_radius_miles,
        confidence: result.confidence,
        classifier_name: result.classifier_name,
        regressor_name: result.regressor_name,
        location: IncidentLocation {
            latitude,
            longitude,
            approx_milepost,
        },
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(max = 23))]
    pub hour: u8,
    /// 0 = Monday .. 6 = Sunday
    #[validate(range(max = 6))]
    pub day_of_week: u8,
    #[validate(range(max = 9))]
    pub location_zone: u8,
    #[validate(range(min = 0.0, max = 1.0))]
    pub milepost_normalized: f64,
    pub incident_type: IncidentType,
    pub lane_closure: LaneClosure,
    pub direction: Direction,
    pub blocking: bool,
    #[validate(range(min = 1, max = 3))]
    pub severity_score: u8,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub high_impact_probability: f64,
    pub high_impact_prediction: u8,
    pub predicted_delay_minutes: f64,
    pub impact_radius_miles: f64,
    pub confidence: Confidence,
    pub classifier_name: String,
    pub regressor_name: String,
    pub location: IncidentLocation,
}

#[derive(Debug, Serialize)]
pub struct IncidentLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub approx_milepost: f64,
}

/// Describe the loaded models
pub async fn model_info(State(state): State<AppState>) -> Result<Json<ModelInfoResponse>> {
    let registry = state.predictor.registry();

    Ok(Json(ModelInfoResponse {
        classifier_name: registry.classifier().name().to_string(),
        regressor_name: registry.regressor().name().to_string(),
        features: registry.schema().names().to_vec(),
        metadata: registry.metadata().cloned(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub classifier_name: String,
    pub regressor_name: String,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TrainingMetadata>,
}

/// Corridor reference geometry for map rendering
pub async fn corridor_geometry(
    State(state): State<AppState>,
) -> Result<Json<CorridorResponse>> {
    Ok(Json(CorridorResponse {
        mileposts: state.corridor.mileposts().to_vec(),
        polylines: state.corridor.polylines().to_vec(),
    }))
}

#[derive(Debug, Serialize)]
pub struct CorridorResponse {
    pub mileposts: Vec<Milepost>,
    /// Centerline polylines as [lon, lat] pairs
    pub polylines: Vec<Vec<[f64; 2]>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_json(hour: u8, severity: u8) -> String {
        format!(
            r#"{{
                "hour": {},
                "day_of_week": 2,
                "location_zone": 5,
                "milepost_normalized": 0.5,
                "incident_type": "injury_collision",
                "lane_closure": "two_lanes",
                "direction": "northbound",
                "blocking": true,
                "severity_score": {}
            }}"#,
            hour, severity
        )
    }

    #[test]
    fn test_predict_request_validation() {
        let ok: PredictRequest = serde_json::from_str(&request_json(16, 2)).unwrap();
        assert!(ok.validate().is_ok());

        let bad_hour: PredictRequest = serde_json::from_str(&request_json(24, 2)).unwrap();
        assert!(bad_hour.validate().is_err());

        let bad_severity: PredictRequest = serde_json::from_str(&request_json(16, 0)).unwrap();
        assert!(bad_severity.validate().is_err());
    }

    #[test]
    fn test_unknown_category_is_rejected_at_parse() {
        let json = request_json(16, 2).replace("injury_collision", "meteor_strike");
        assert!(serde_json::from_str::<PredictRequest>(&json).is_err());
    }
}
