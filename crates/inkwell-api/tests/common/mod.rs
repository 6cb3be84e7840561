//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use inkwell_core::clock::Clock;
use inkwell_core::config::TransitionTimings;
use inkwell_core::source::SceneSource;
use inkwell_test_support::{FixedClock, ImmediateScheduler, RecordingPresentationSink};
use tower::ServiceExt;

use inkwell_api::routes;
use inkwell_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Test harness: app state plus handles on the recording doubles.
pub struct TestApp {
    pub state: AppState,
    pub scheduler: Arc<ImmediateScheduler>,
    pub sink: Arc<RecordingPresentationSink>,
}

impl TestApp {
    /// Build state around `source` with a deterministic clock, an immediate
    /// scheduler and a recording sink. The session starts in `Loading`.
    pub fn new(source: Arc<dyn SceneSource>) -> Self {
        let scheduler = Arc::new(ImmediateScheduler::new());
        let sink = Arc::new(RecordingPresentationSink::new());
        let state = AppState::new(
            fixed_clock(),
            scheduler.clone(),
            source,
            sink.clone(),
            TransitionTimings::default(),
        );
        Self {
            state,
            scheduler,
            sink,
        }
    }

    /// Build the full app router. Uses the same route structure as `main.rs`.
    pub fn router(&self) -> Router {
        Router::new()
            .merge(routes::health::router())
            .nest("/api/v1/player", routes::player::router())
            .with_state(self.state.clone())
    }

    /// Start the background load the way the server does at startup and wait
    /// until it settles.
    pub async fn start(&self) -> serde_json::Value {
        routes::player::start_load(&self.state).unwrap();
        self.wait_for(|view| view["status"] != "loading").await
    }

    /// Poll the player view until `done` holds.
    ///
    /// # Panics
    ///
    /// Panics if the condition does not hold within a second.
    pub async fn wait_for(&self, done: impl Fn(&serde_json::Value) -> bool) -> serde_json::Value {
        for _ in 0..200 {
            let (_, view) = get_json(self.router(), "/api/v1/player").await;
            if done(&view) {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("player view did not reach the expected state");
    }

    /// Poll until no transition is in flight.
    pub async fn wait_until_idle(&self) -> serde_json::Value {
        self.wait_for(|view| view["status"] != "ready" || view["phase"]["name"] == "idle")
            .await
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a bodiless POST request and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
