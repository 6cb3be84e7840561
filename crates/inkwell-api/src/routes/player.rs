//! Routes for the scene player session.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use inkwell_narrative::application::command_handlers;
use inkwell_narrative::application::errors::PlayerError;
use inkwell_narrative::application::query_handlers::{self, PlayerView};
use inkwell_narrative::application::session::PendingTransition;
use inkwell_narrative::domain::commands;
use inkwell_scenes::domain::scene::SceneId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /choose.
#[derive(Debug, Deserialize)]
pub struct ChooseRequest {
    /// Target of the selected choice.
    #[serde(default)]
    pub next_scene_id: Option<i64>,
}

/// Response body for an accepted choice.
#[derive(Debug, Serialize)]
pub struct ChooseResponse {
    /// Correlation id of the transition, as logged.
    pub correlation_id: Uuid,
    /// Scene the player is moving to.
    pub next_scene_id: SceneId,
}

/// Response body for an accepted reload.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    /// Correlation id of the load, as logged.
    pub correlation_id: Uuid,
    /// Session generation the load belongs to.
    pub generation: u64,
}

/// Puts the session into `Loading` and fetches the scene table in the
/// background.
///
/// # Errors
///
/// Returns `PlayerError::Poisoned` if the session lock is poisoned.
pub fn start_load(state: &AppState) -> Result<ReloadResponse, PlayerError> {
    let command = commands::ReloadScenes {
        correlation_id: Uuid::new_v4(),
    };
    let generation = command_handlers::begin_load(&command, &state.session)?;

    let state = state.clone();
    tokio::spawn(async move {
        let result = command_handlers::complete_load(
            generation,
            &state.session,
            state.source.as_ref(),
            state.clock.as_ref(),
            state.sink.as_ref(),
        )
        .await;
        log_outcome("load", command.correlation_id, result);
    });

    Ok(ReloadResponse {
        correlation_id: command.correlation_id,
        generation,
    })
}

fn spawn_transition(state: &AppState, correlation_id: Uuid, pending: PendingTransition) {
    let state = state.clone();
    tokio::spawn(async move {
        let result = command_handlers::run_transition(
            pending,
            &state.session,
            state.scheduler.as_ref(),
            state.timings,
            state.clock.as_ref(),
            state.sink.as_ref(),
        )
        .await;
        log_outcome("transition", correlation_id, result);
    });
}

fn log_outcome(task: &'static str, correlation_id: Uuid, result: Result<SceneId, PlayerError>) {
    match result {
        Ok(scene) => debug!(%correlation_id, task, scene = %scene, "background task finished"),
        Err(PlayerError::Superseded) => {
            debug!(%correlation_id, task, "background task superseded by a reload");
        }
        Err(e) => warn!(%correlation_id, task, error = %e, "background task failed"),
    }
}

/// GET /
async fn get_player(State(state): State<AppState>) -> Result<Json<PlayerView>, ApiError> {
    let view = query_handlers::get_player_view(&state.session, state.clock.as_ref())?;
    Ok(Json(view))
}

/// POST /choose
#[instrument(skip(state, request), fields(next_scene_id = ?request.next_scene_id))]
async fn choose(
    State(state): State<AppState>,
    Json(request): Json<ChooseRequest>,
) -> Result<(StatusCode, Json<ChooseResponse>), ApiError> {
    let command = commands::ChooseScene {
        correlation_id: Uuid::new_v4(),
        next_scene_id: request.next_scene_id.map(SceneId),
    };

    info!(correlation_id = %command.correlation_id, "handling choose_scene command");

    let pending = command_handlers::begin_choice(&command, &state.session, state.clock.as_ref())?;
    spawn_transition(&state, command.correlation_id, pending);

    Ok((
        StatusCode::ACCEPTED,
        Json(ChooseResponse {
            correlation_id: command.correlation_id,
            next_scene_id: pending.target,
        }),
    ))
}

/// POST /reload
#[instrument(skip(state))]
async fn reload(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ReloadResponse>), ApiError> {
    let response = start_load(&state)?;
    info!(correlation_id = %response.correlation_id, "handling reload_scenes command");
    Ok((StatusCode::ACCEPTED, Json(response)))
}

/// Returns the router for the player session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_player))
        .route("/choose", post(choose))
        .route("/reload", post(reload))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use inkwell_core::config::TransitionTimings;
    use inkwell_core::scheduler::{Scheduler, TokioScheduler};
    use inkwell_test_support::{
        FixedClock, ImmediateScheduler, RecordingPresentationSink, StaticSceneSource,
        sample_rows,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_state_with(scheduler: Arc<dyn Scheduler>, timings: TransitionTimings) -> AppState {
        AppState::new(
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())),
            scheduler,
            Arc::new(StaticSceneSource::new(sample_rows())),
            Arc::new(RecordingPresentationSink::new()),
            timings,
        )
    }

    fn test_app_state() -> AppState {
        app_state_with(
            Arc::new(ImmediateScheduler::new()),
            TransitionTimings::default(),
        )
    }

    async fn load(state: &AppState) {
        let command = commands::ReloadScenes {
            correlation_id: Uuid::new_v4(),
        };
        command_handlers::handle_load(
            &command,
            &state.session,
            state.source.as_ref(),
            state.clock.as_ref(),
            state.sink.as_ref(),
        )
        .await
        .unwrap();
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router()
            .with_state(state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    fn choose_request(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/choose")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    fn get_request() -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_player_reports_loading_before_first_load() {
        let state = test_app_state();

        let (status, json) = send(&state, get_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "loading");
    }

    #[tokio::test]
    async fn test_get_player_returns_starting_scene() {
        // Arrange
        let state = test_app_state();
        load(&state).await;

        // Act
        let (status, json) = send(&state, get_request()).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ready");
        assert_eq!(json["scene"]["id"], 1);
        assert_eq!(json["scene"]["kind"], "question");
        assert_eq!(json["scene_count"], 4);
        assert_eq!(json["navigation"]["is_transitioning"], false);
    }

    #[tokio::test]
    async fn test_choose_returns_202_with_target() {
        // Arrange
        let state = test_app_state();
        load(&state).await;

        // Act
        let (status, json) =
            send(&state, choose_request(&serde_json::json!({ "next_scene_id": 2 }))).await;

        // Assert
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json["next_scene_id"], 2);
        Uuid::parse_str(json["correlation_id"].as_str().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_choose_returns_503_while_loading() {
        let state = test_app_state();

        let (status, json) =
            send(&state, choose_request(&serde_json::json!({ "next_scene_id": 2 }))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "not_ready");
    }

    #[tokio::test]
    async fn test_choose_unknown_scene_returns_404_and_faults_session() {
        // Arrange
        let state = test_app_state();
        load(&state).await;

        // Act
        let (status, json) =
            send(&state, choose_request(&serde_json::json!({ "next_scene_id": 99 }))).await;

        // Assert
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "unknown_target");
        assert_eq!(
            json["message"],
            "next scene 99 does not exist; check the scene table"
        );

        let (_, view) = send(&state, get_request()).await;
        assert_eq!(view["status"], "faulted");
    }

    #[tokio::test]
    async fn test_choose_without_target_returns_422() {
        let state = test_app_state();
        load(&state).await;

        let (status, json) = send(&state, choose_request(&serde_json::json!({}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "invalid_target");
    }

    #[tokio::test]
    async fn test_second_choice_during_transition_returns_409() {
        // Arrange: a fade long enough that the first transition is still
        // in flight when the second request arrives.
        let state = app_state_with(
            Arc::new(TokioScheduler),
            TransitionTimings {
                fade_out: Duration::from_secs(60),
                fade_in: Duration::from_secs(60),
            },
        );
        load(&state).await;
        let (first, _) =
            send(&state, choose_request(&serde_json::json!({ "next_scene_id": 2 }))).await;

        // Act
        let (second, json) =
            send(&state, choose_request(&serde_json::json!({ "next_scene_id": 3 }))).await;

        // Assert
        assert_eq!(first, StatusCode::ACCEPTED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(json["error"], "transition_in_progress");

        let (_, view) = send(&state, get_request()).await;
        assert_eq!(view["status"], "ready");
        assert_eq!(view["phase"]["name"], "fading_out");
        assert_eq!(view["phase"]["target"], 2);
        assert_eq!(view["scene"]["id"], 1);
    }

    #[tokio::test]
    async fn test_reload_returns_202_with_new_generation() {
        // Arrange
        let state = test_app_state();
        load(&state).await;

        let request = Request::builder()
            .method("POST")
            .uri("/reload")
            .body(Body::empty())
            .unwrap();

        // Act
        let (status, json) = send(&state, request).await;

        // Assert
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json["generation"], 2);
    }
}
