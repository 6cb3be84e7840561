//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use inkwell_narrative::application::session::{SessionStatus, lock_session};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Player session status: `loading`, `ready` or `faulted`.
    pub session: &'static str,
}

/// GET /health
///
/// The service stays healthy while the session is faulted; a reload
/// recovers it.
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let session = match lock_session(&state.session)?.status() {
        SessionStatus::Loading => "loading",
        SessionStatus::Ready(_) => "ready",
        SessionStatus::Faulted(_) => "faulted",
    };

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        session,
    }))
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
