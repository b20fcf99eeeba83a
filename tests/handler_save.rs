mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use link_shortener::domain::repositories::UrlStore;
use serde_json::{Value, json};

fn auth(value: &'static str) -> (HeaderName, HeaderValue) {
    (header::AUTHORIZATION, HeaderValue::from_static(value))
}

#[tokio::test]
async fn test_save_with_alias() {
    let (server, store, _dir) = common::server().await;
    let (name, value) = auth(common::AUTH_HEADER);

    let response = server
        .post("/url")
        .add_header(name, value)
        .json(&json!({ "url": "https://example.com/page", "alias": "page" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "OK", "alias": "page" }));
    assert_eq!(
        store.get_url("page").await.unwrap(),
        "https://example.com/page"
    );
}

#[tokio::test]
async fn test_save_generates_alias() {
    let (server, store, _dir) = common::server().await;
    let (name, value) = auth(common::AUTH_HEADER);

    let response = server
        .post("/url")
        .add_header(name, value)
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let alias = body["alias"].as_str().unwrap();

    assert_eq!(alias.len(), 6);
    assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(store.get_url(alias).await.unwrap(), "https://example.com");
}

#[tokio::test]
async fn test_save_duplicate_alias() {
    let (server, store, _dir) = common::server().await;

    for (url, expected) in [
        ("https://first.example", StatusCode::OK),
        ("https://second.example", StatusCode::CONFLICT),
    ] {
        let (name, value) = auth(common::AUTH_HEADER);
        let response = server
            .post("/url")
            .add_header(name, value)
            .json(&json!({ "url": url, "alias": "same" }))
            .await;

        assert_eq!(response.status_code(), expected);
    }

    assert_eq!(store.get_url("same").await.unwrap(), "https://first.example");
    assert_eq!(common::count_urls(&store).await, 1);
}

#[tokio::test]
async fn test_duplicate_alias_error_body() {
    let (server, store, _dir) = common::server().await;
    store.save_url("https://taken.example", "taken").await.unwrap();

    let (name, value) = auth(common::AUTH_HEADER);
    let response = server
        .post("/url")
        .add_header(name, value)
        .json(&json!({ "url": "https://example.com", "alias": "taken" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({ "status": "Error", "error": "url already exists" }));
}

#[tokio::test]
async fn test_save_without_credentials() {
    let (server, store, _dir) = common::server().await;

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "nope" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    assert_eq!(common::count_urls(&store).await, 0);
}

#[tokio::test]
async fn test_save_wrong_password() {
    let (server, store, _dir) = common::server().await;
    // admin:wrong
    let (name, value) = auth("Basic YWRtaW46d3Jvbmc=");

    let response = server
        .post("/url")
        .add_header(name, value)
        .json(&json!({ "url": "https://example.com", "alias": "nope" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(common::count_urls(&store).await, 0);
}

#[tokio::test]
async fn test_save_invalid_url() {
    let (server, store, _dir) = common::server().await;
    let (name, value) = auth(common::AUTH_HEADER);

    let response = server
        .post("/url")
        .add_header(name, value)
        .json(&json!({ "url": "not a url", "alias": "bad" }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "status": "Error",
        "error": "field url is not a valid URL"
    }));
    assert_eq!(common::count_urls(&store).await, 0);
}

#[tokio::test]
async fn test_save_empty_body() {
    let (server, _store, _dir) = common::server().await;
    let (name, value) = auth(common::AUTH_HEADER);

    let response = server.post("/url").add_header(name, value).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"], "empty request");
}

#[tokio::test]
async fn test_save_rejects_url_the_redirect_cannot_carry() {
    let (server, store, _dir) = common::server().await;

    for url in [
        "https://example.com/\nx",
        " https://example.com/",
        "https://exa\tmple.com/",
    ] {
        let (name, value) = auth(common::AUTH_HEADER);
        let response = server
            .post("/url")
            .add_header(name, value)
            .json(&json!({ "url": url, "alias": "ws" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "field url is not a valid URL",
            "url: {url:?}"
        );
    }

    assert_eq!(common::count_urls(&store).await, 0);
    server.get("/ws").await.assert_status_not_found();
}
