//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /ping`     - Liveness check (public)
//! - `GET  /{alias}`  - Alias redirect (public)
//! - `POST /url`      - Save a URL (basic auth required)
//!
//! Anything else gets the `404 not found` envelope; a known path with the
//! wrong method gets `405 method not allowed`.
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Request id** - `x-request-id` assigned and echoed back
//! - **Tracing** - Structured request/response logging
//! - **Envelope** - Bare error responses rewritten as the JSON envelope
//! - **Timeout** - Whole-request deadline, `408` when exceeded
//! - **Panic recovery** - `500` envelope instead of a dropped connection
//! - **Authentication** - Basic auth on `/url` only

use crate::api::handlers::{not_found_handler, ping_handler, redirect_handler, save_handler};
use crate::api::middleware::{auth, envelope, recovery, request_id, tracing};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Router, middleware};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - deadline for handling a whole request
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let protected = Router::new()
        .route("/url", post(save_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/{alias}", get(redirect_handler))
        .merge(protected)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(request_id::set_layer())
                .layer(request_id::propagate_layer())
                .layer(tracing::layer())
                .layer(middleware::from_fn(envelope::layer))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(recovery::layer()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlStore;
    use crate::error::AUTH_REALM;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    const AUTH: &str = "Basic dXNlcjpzZWNyZXQ=";

    fn server(store: MockUrlStore) -> TestServer {
        let app = app_router(AppState::with_store(store), Duration::from_secs(4));
        TestServer::new(app).unwrap()
    }

    fn authorization(value: &'static str) -> (HeaderName, HeaderValue) {
        (
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static(value),
        )
    }

    #[tokio::test]
    async fn test_ping_is_public() {
        let response = server(MockUrlStore::new()).get("/ping").await;

        response.assert_status_ok();
        response.assert_text("PONG");
    }

    #[tokio::test]
    async fn test_save_requires_auth() {
        let mut store = MockUrlStore::new();
        store.expect_save_url().times(0);

        let response = server(store)
            .post("/url")
            .json(&json!({ "url": "https://example.com" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.header("www-authenticate"), AUTH_REALM);
        assert_eq!(response.json::<Value>()["status"], "Error");
    }

    #[tokio::test]
    async fn test_save_with_auth() {
        let mut store = MockUrlStore::new();
        store
            .expect_save_url()
            .withf(|url, alias| url == "https://example.com" && alias == "ex")
            .times(1)
            .returning(|_, _| Ok(1));

        let (name, value) = authorization(AUTH);
        let response = server(store)
            .post("/url")
            .add_header(name, value)
            .json(&json!({ "url": "https://example.com", "alias": "ex" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "OK", "alias": "ex" }));
    }

    #[tokio::test]
    async fn test_redirect_is_public() {
        let mut store = MockUrlStore::new();
        store
            .expect_get_url()
            .times(1)
            .returning(|_| Ok("https://example.com/".to_string()));

        let response = server(store).get("/ex").await;

        assert_eq!(response.status_code(), StatusCode::FOUND);
        assert_eq!(response.header("location"), "https://example.com/");
    }

    #[tokio::test]
    async fn test_get_on_save_route_is_not_a_redirect() {
        let mut store = MockUrlStore::new();
        store.expect_get_url().times(0);

        let response = server(store).get("/url").await;

        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        response.assert_json(&json!({ "status": "Error", "error": "method not allowed" }));
    }

    #[tokio::test]
    async fn test_unknown_path_returns_envelope() {
        let response = server(MockUrlStore::new()).get("/a/b/c").await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "status": "Error", "error": "not found" }));
    }

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let response = server(MockUrlStore::new()).get("/ping").await;

        let id = response.header(request_id::REQUEST_ID_HEADER);
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = server(MockUrlStore::new())
            .get("/ping")
            .add_header(
                HeaderName::from_static(request_id::REQUEST_ID_HEADER),
                HeaderValue::from_static("req-42"),
            )
            .await;

        assert_eq!(response.header(request_id::REQUEST_ID_HEADER), "req-42");
    }
}
