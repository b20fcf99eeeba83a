#![allow(dead_code)]

use axum_test::TestServer;
use link_shortener::application::services::{AuthService, UrlService};
use link_shortener::infrastructure::persistence::SqliteUrlStore;
use link_shortener::routes::app_router;
use link_shortener::state::AppState;
use link_shortener::utils::alias_generator::AliasGenerator;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const USER: &str = "admin";
pub const PASSWORD: &str = "s3cret";

/// `Basic base64("admin:s3cret")`
pub const AUTH_HEADER: &str = "Basic YWRtaW46czNjcmV0";

/// A store on a fresh database file; the directory lives as long as the guard.
pub async fn open_store() -> (SqliteUrlStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteUrlStore::open(dir.path().join("storage.db"), 1)
        .await
        .unwrap();
    (store, dir)
}

pub fn state(store: SqliteUrlStore) -> AppState {
    let url_service = UrlService::new(
        Arc::new(store),
        AliasGenerator::default(),
        Duration::from_secs(2),
    );

    AppState::new(
        Arc::new(url_service),
        Arc::new(AuthService::new(USER, PASSWORD)),
    )
}

pub async fn server() -> (TestServer, SqliteUrlStore, TempDir) {
    let (store, dir) = open_store().await;
    let app = app_router(state(store.clone()), Duration::from_secs(4));
    (TestServer::new(app).unwrap(), store, dir)
}

pub async fn count_urls(store: &SqliteUrlStore) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(store.pool())
        .await
        .unwrap()
}
