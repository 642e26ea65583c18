use corridor_impact::{
    api::{build_router, AppState},
    config::Config,
    corridor::CorridorMap,
    ml::{ImpactPredictor, ModelRegistry},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corridor_impact=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting Corridor Impact v{}", env!("CARGO_PKG_VERSION"));

    // Load the trained model artifacts; without them the service cannot
    // answer anything, so a failure here is fatal.
    let registry = ModelRegistry::load(&config.models)?;
    let predictor = Arc::new(ImpactPredictor::new(Arc::new(registry)));

    // Load corridor reference geometry
    let corridor = Arc::new(CorridorMap::load(&config.corridor)?);

    // Create application state for the HTTP API
    let app_state = AppState::new(predictor, corridor);

    // Build HTTP router
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Prediction: http://{}/v1/predict", http_addr);

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
