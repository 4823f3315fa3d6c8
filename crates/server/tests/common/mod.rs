//! Common test utilities for in-process API testing with mock sources.
//!
//! This module provides a test fixture that builds the router with
//! `MockSource`s in place of the real upstream adapters.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use trawler_core::{testing::MockSource, Aggregator, Config, Source};
use trawler_server::state::AppState;

/// Re-export fixtures for test convenience
pub use trawler_core::testing::fixtures;

/// Test fixture with three mock sources in priority order.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.sources[0].set_records(vec![...]).await;
///
///     let response = fixture.post("/api/v1/search", json!({ "keyword": "ubuntu" })).await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock sources, highest priority first
    pub sources: Vec<Arc<MockSource>>,
}

/// Response from a JSON test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Response from a request whose body is not JSON
#[derive(Debug)]
pub struct TextResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestFixture {
    /// Create a fixture with mock sources named `alpha`, `beta`, `gamma`.
    pub fn new() -> Self {
        Self::with_sources(&["alpha", "beta", "gamma"])
    }

    /// Create a fixture with the given mock source names, in priority order.
    pub fn with_sources(names: &[&str]) -> Self {
        let sources: Vec<Arc<MockSource>> = names
            .iter()
            .map(|name| Arc::new(MockSource::new(name)))
            .collect();

        let dyn_sources: Vec<Arc<dyn Source>> = sources
            .iter()
            .map(|source| Arc::clone(source) as Arc<dyn Source>)
            .collect();

        let aggregator = Aggregator::new(dyn_sources)
            .with_timeouts(Duration::from_millis(500), Duration::from_secs(1));

        let state = Arc::new(AppState::new(Config::default(), aggregator));
        let router = trawler_server::api::create_router(state);

        Self { router, sources }
    }

    /// Send a GET request expecting JSON.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a GET request and read the body as text.
    pub async fn get_text(&self, path: &str) -> TextResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send_text(request).await
    }

    /// Send a urlencoded form POST and read the body as text.
    pub async fn post_form(&self, path: &str, form: &str) -> TextResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send_text(request).await
    }

    async fn send_text(&self, request: Request<Body>) -> TextResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        TextResponse {
            status,
            content_type,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

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

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
