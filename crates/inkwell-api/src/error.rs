//! Inkwell — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inkwell_core::error::SourceError;
use inkwell_narrative::application::errors::PlayerError;
use inkwell_narrative::domain::errors::NavigationError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The scene data source could not be set up.
    #[error("data source error: {0}")]
    Source(#[from] SourceError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// The span exporter could not be built.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `PlayerError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub PlayerError);

impl From<PlayerError> for ApiError {
    fn from(err: PlayerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            PlayerError::Navigation(nav) => match nav {
                NavigationError::TransitionInProgress { .. } => {
                    (StatusCode::CONFLICT, "transition_in_progress")
                }
                NavigationError::UnknownTarget(_) => (StatusCode::NOT_FOUND, "unknown_target"),
                NavigationError::InvalidTarget => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_target")
                }
                NavigationError::SceneNotFound(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "scene_not_found")
                }
                NavigationError::NoScenes => (StatusCode::INTERNAL_SERVER_ERROR, "no_scenes"),
            },
            PlayerError::NotReady(_) => (StatusCode::SERVICE_UNAVAILABLE, "not_ready"),
            PlayerError::Superseded => (StatusCode::CONFLICT, "superseded"),
            PlayerError::Source(_) => (StatusCode::BAD_GATEWAY, "source_error"),
            PlayerError::Load(_) => (StatusCode::BAD_GATEWAY, "load_error"),
            PlayerError::Poisoned(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
