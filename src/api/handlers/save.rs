//! Handler for the save endpoint.

use axum::{Json, body::Bytes, extract::State};
use tracing::{error, info};

use crate::api::dto::save::{SaveRequest, SaveResponse};
use crate::error::{AppError, StorageError};
use crate::state::AppState;

/// Saves a URL under a client-supplied or generated alias.
///
/// # Endpoint
///
/// `POST /url` (basic auth)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "example" }
/// ```
///
/// `alias` is optional; a random alias is generated when it is missing or
/// empty. The body is decoded regardless of `Content-Type`.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "example" }
/// ```
///
/// # Errors
///
/// - 400 `empty request` if the body is empty
/// - 400 `failed to decode request` if the body is not the expected JSON
/// - 400 with one message per invalid field if validation fails
/// - 409 `url already exists` if the alias is taken
/// - 500 `failed to add url` on any other storage failure
#[tracing::instrument(name = "save", skip_all, fields(op = "handlers.url.save"))]
pub async fn save_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaveResponse>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        error!("request body is empty");
        return Err(AppError::bad_request("empty request"));
    }

    let payload: SaveRequest = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "failed to decode request body");
        AppError::bad_request("failed to decode request")
    })?;

    if let Err(message) = payload.check() {
        error!(error = %message, "invalid request");
        return Err(AppError::bad_request(message));
    }

    info!(url = ?payload.url, alias = ?payload.alias, "request body decoded");

    let url = payload
        .url
        .ok_or_else(|| AppError::bad_request("field url is a required field"))?;

    match state.url_service.save(&url, payload.alias).await {
        Ok(record) => {
            info!(id = record.id, alias = %record.alias, "url added");
            Ok(Json(SaveResponse::ok(record.alias)))
        }
        Err(StorageError::UrlExists) => {
            info!(url = %url, "url already exists");
            Err(AppError::conflict("url already exists"))
        }
        Err(e) => {
            error!(error = %e, "failed to add url");
            Err(AppError::internal("failed to add url"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlStore;
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    fn server(store: MockUrlStore) -> TestServer {
        let app = Router::new()
            .route("/url", post(save_handler))
            .with_state(AppState::with_store(store));

        TestServer::new(app).unwrap()
    }

    #[derive(Clone, Copy)]
    enum MockError {
        Exists,
        Database,
    }

    struct Case {
        name: &'static str,
        alias: &'static str,
        url: &'static str,
        status: StatusCode,
        resp_error: Option<&'static str>,
        mock_error: Option<MockError>,
    }

    #[tokio::test]
    async fn test_save_handler_cases() {
        let cases = [
            Case {
                name: "success",
                alias: "test_alias",
                url: "https://google.com",
                status: StatusCode::OK,
                resp_error: None,
                mock_error: None,
            },
            Case {
                name: "empty alias",
                alias: "",
                url: "https://google.com",
                status: StatusCode::OK,
                resp_error: None,
                mock_error: None,
            },
            Case {
                name: "empty url",
                alias: "some_alias",
                url: "",
                status: StatusCode::BAD_REQUEST,
                resp_error: Some("field url is a required field"),
                mock_error: None,
            },
            Case {
                name: "invalid url",
                alias: "some_alias",
                url: "some invalid URL",
                status: StatusCode::BAD_REQUEST,
                resp_error: Some("field url is not a valid URL"),
                mock_error: None,
            },
            Case {
                name: "url with newline",
                alias: "some_alias",
                url: "https://example.com/\nx",
                status: StatusCode::BAD_REQUEST,
                resp_error: Some("field url is not a valid URL"),
                mock_error: None,
            },
            Case {
                name: "url with leading space",
                alias: "some_alias",
                url: " https://example.com/",
                status: StatusCode::BAD_REQUEST,
                resp_error: Some("field url is not a valid URL"),
                mock_error: None,
            },
            Case {
                name: "alias exists",
                alias: "taken",
                url: "https://google.com",
                status: StatusCode::CONFLICT,
                resp_error: Some("url already exists"),
                mock_error: Some(MockError::Exists),
            },
            Case {
                name: "save error",
                alias: "test_alias",
                url: "https://google.com",
                status: StatusCode::INTERNAL_SERVER_ERROR,
                resp_error: Some("failed to add url"),
                mock_error: Some(MockError::Database),
            },
        ];

        for case in cases {
            let mut store = MockUrlStore::new();

            if case.resp_error.is_none() || case.mock_error.is_some() {
                let url = case.url;
                let mock_error = case.mock_error;
                store
                    .expect_save_url()
                    .withf(move |u, _| u == url)
                    .times(1)
                    .returning(move |_, _| match mock_error {
                        Some(MockError::Exists) => Err(StorageError::UrlExists),
                        Some(MockError::Database) => {
                            Err(StorageError::Database(sqlx::Error::PoolTimedOut))
                        }
                        None => Ok(1),
                    });
            }

            let response = server(store)
                .post("/url")
                .json(&json!({ "url": case.url, "alias": case.alias }))
                .await;

            assert_eq!(response.status_code(), case.status, "case: {}", case.name);

            let body = response.json::<Value>();
            match case.resp_error {
                Some(message) => {
                    assert_eq!(body["status"], "Error", "case: {}", case.name);
                    assert_eq!(body["error"], message, "case: {}", case.name);
                }
                None => {
                    assert_eq!(body["status"], "OK", "case: {}", case.name);
                    assert!(body.get("error").is_none(), "case: {}", case.name);
                    let alias = body["alias"].as_str().unwrap();
                    if case.alias.is_empty() {
                        assert_eq!(alias.len(), 6, "case: {}", case.name);
                    } else {
                        assert_eq!(alias, case.alias, "case: {}", case.name);
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_save_empty_body() {
        let mut store = MockUrlStore::new();
        store.expect_save_url().times(0);

        let response = server(store).post("/url").await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["error"], "empty request");
    }

    #[tokio::test]
    async fn test_save_malformed_json() {
        let mut store = MockUrlStore::new();
        store.expect_save_url().times(0);

        let response = server(store).post("/url").text("{\"url\": ").await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["error"], "failed to decode request");
    }

    #[tokio::test]
    async fn test_save_without_content_type() {
        let mut store = MockUrlStore::new();
        store
            .expect_save_url()
            .times(1)
            .returning(|_, _| Ok(1));

        let response = server(store)
            .post("/url")
            .text(r#"{"url": "https://example.com", "alias": "plain"}"#)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["alias"], "plain");
    }

    #[tokio::test]
    async fn test_save_missing_url_field() {
        let mut store = MockUrlStore::new();
        store.expect_save_url().times(0);

        let response = server(store)
            .post("/url")
            .json(&json!({ "alias": "abc" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "field url is a required field"
        );
    }

    #[tokio::test]
    async fn test_save_reserved_alias() {
        let mut store = MockUrlStore::new();
        store.expect_save_url().times(0);

        let response = server(store)
            .post("/url")
            .json(&json!({ "url": "https://example.com", "alias": "url" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "field alias is reserved");
    }

    #[tokio::test]
    async fn test_save_storage_timeout() {
        let mut store = MockUrlStore::new();
        store
            .expect_save_url()
            .times(1)
            .returning(|_, _| Err(StorageError::Timeout(std::time::Duration::from_secs(1))));

        let response = server(store)
            .post("/url")
            .json(&json!({ "url": "https://example.com" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<Value>()["error"], "failed to add url");
    }
}
