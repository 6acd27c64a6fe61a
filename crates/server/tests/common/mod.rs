//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock movie source injected, enabling comprehensive E2E testing
//! without external infrastructure.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use faceoff_core::{testing::MockMovieSource, Config, MovieSource, TournamentConfig};

/// Re-export fixtures for test convenience
pub use faceoff_core::testing::fixtures;

/// Test fixture for E2E testing with a mock movie source.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_session_creation() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.post("/api/v1/sessions", json!({
///         "mode": "single",
///         "actor_id": 500
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock movie source - configure per-actor names and movie lists
    pub source: Arc<MockMovieSource>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with a mock movie source wired in.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Create a test fixture with no movie source configured.
    pub fn without_source() -> Self {
        Self::build(false)
    }

    fn build(with_source: bool) -> Self {
        let source = Arc::new(MockMovieSource::new());

        let config = Config {
            tournament: TournamentConfig {
                movies_per_actor: 32,
                fetch_timeout_secs: 5,
            },
            ..test_config()
        };

        let movie_source = with_source
            .then(|| Arc::clone(&source) as Arc<dyn MovieSource>);
        let state = Arc::new(faceoff_server::state::AppState::new(config, movie_source));
        let router = faceoff_server::api::create_router(state);

        Self { router, source }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Poll a session until its phase leaves `loading` (the fetch task
    /// created by POST /sessions runs in the background).
    pub async fn wait_for_loaded(&self, session_id: &str) -> TestResponse {
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            let response = self.get(&format!("/api/v1/sessions/{}", session_id)).await;
            let phase_type = response.body["phase"]["type"].as_str().unwrap_or("");
            if phase_type != "loading" || std::time::Instant::now() > deadline {
                return response;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let request = match body {
            Some(json_body) => {
                request_builder = request_builder.header("Content-Type", "application/json");
                request_builder
                    .body(Body::from(json_body.to_string()))
                    .unwrap()
            }
            None => request_builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

fn test_config() -> Config {
    faceoff_core::load_config_from_str("").expect("empty config should parse to defaults")
}
