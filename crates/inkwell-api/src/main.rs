//! Inkwell scene player API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use inkwell_core::clock::SystemClock;
use inkwell_core::scheduler::TokioScheduler;
use inkwell_sheets::sheet_source::SheetSource;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use inkwell_api::config::ServerConfig;
use inkwell_api::error::AppError;
use inkwell_api::routes;
use inkwell_api::sink::TracingPresentationSink;
use inkwell_api::state::AppState;
use inkwell_api::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = ServerConfig::from_env()?;

    // Initialize tracing subscriber.
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!(
        otlp = telemetry.exports_spans(),
        "Starting Inkwell scene player API server"
    );

    // Build application state.
    let source = SheetSource::new(&config.player.source_url).map_err(AppError::from)?;
    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(TokioScheduler),
        Arc::new(source),
        Arc::new(TracingPresentationSink),
        config.player.transition,
    );

    // Fetch the scene table in the background; the player reports `loading`
    // until it arrives.
    routes::player::start_load(&app_state)?;

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/player", routes::player::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::from)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::from)?;

    telemetry.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
