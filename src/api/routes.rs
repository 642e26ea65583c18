use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check))
        // Prediction
        .route("/v1/predict", post(handlers::predict_impact))
        // Model provenance
        .route("/v1/models", get(handlers::model_info))
        // Corridor reference geometry
        .route("/v1/corridor", get(handlers::corridor_geometry))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
