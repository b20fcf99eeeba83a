//! HTTP server initialization and runtime setup.
//!
//! Opens storage, wires services into [`AppState`] and drives the connection
//! loop until a shutdown signal arrives.
//!
//! Connections are served by hyper directly so idle keep-alive connections can
//! be bounded: a connection that does not deliver a complete request header
//! within `HTTP_IDLE_TIMEOUT` is closed.

use crate::application::services::{AuthService, UrlService};
use crate::config::Config;
use crate::graceful_shutdown;
use crate::infrastructure::persistence::SqliteUrlStore;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::alias_generator::AliasGenerator;

use anyhow::{Context, Result};
use axum::Router;
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tower::Service;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite pool with migrations applied
/// - Alias generator, URL and auth services
/// - HTTP server with idle timeout and graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Storage cannot be opened or migrated
/// - The alias alphabet or length is unusable
/// - Server bind fails
pub async fn run(config: Config) -> Result<()> {
    let store = SqliteUrlStore::open(&config.storage_path, config.db_max_connections)
        .await
        .with_context(|| {
            format!(
                "failed to init storage at {}",
                config.storage_path.display()
            )
        })?;
    tracing::info!(path = %config.storage_path.display(), "storage opened");

    let generator = AliasGenerator::new(&config.alias_alphabet, config.alias_length)
        .context("invalid alias generator settings")?;

    let url_service = UrlService::new(
        Arc::new(store.clone()),
        generator,
        config.storage_timeout,
    );
    let auth_service = AuthService::new(&config.http_user, config.http_password.expose());
    let state = AppState::new(Arc::new(url_service), Arc::new(auth_service));

    let app = app_router(state, config.http_timeout);

    let listener = TcpListener::bind(&config.http_address)
        .await
        .with_context(|| format!("failed to bind {}", config.http_address))?;
    tracing::info!(address = %config.http_address, "starting server");

    serve(
        listener,
        app,
        config.http_idle_timeout,
        graceful_shutdown::handler(),
    )
    .await;

    store.close().await;
    tracing::info!("server stopped");

    Ok(())
}

/// Accepts connections on `listener` until `shutdown` resolves, then asks every
/// open connection to finish its in-flight request and waits for them.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    idle_timeout: Duration,
    shutdown: impl Future<Output = ()>,
) {
    let (close_tx, close_rx) = watch::channel(());
    let mut connections = JoinSet::new();

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => break,

            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                connections.spawn(serve_connection(
                    stream,
                    app.clone(),
                    idle_timeout,
                    close_rx.clone(),
                    peer,
                ));
            }

            Some(_) = connections.join_next(), if !connections.is_empty() => {}
        }
    }

    drop(listener);
    tracing::info!(open = connections.len(), "draining connections");

    // Receivers are still held by the connection tasks.
    let _ = close_tx.send(());
    while connections.join_next().await.is_some() {}
}

async fn serve_connection(
    stream: TcpStream,
    app: Router,
    idle_timeout: Duration,
    mut close_rx: watch::Receiver<()>,
    peer: std::net::SocketAddr,
) {
    let service = hyper::service::service_fn(move |request: hyper::Request<Incoming>| {
        app.clone().call(request)
    });

    let mut builder = ConnBuilder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(idle_timeout);

    let conn = builder.serve_connection(TokioIo::new(stream), service);
    tokio::pin!(conn);

    let result = tokio::select! {
        result = conn.as_mut() => result,
        _ = close_rx.changed() => {
            conn.as_mut().graceful_shutdown();
            conn.as_mut().await
        }
    };

    if let Err(e) = result {
        tracing::debug!(peer = %peer, error = %e, "connection closed with error");
    }
}
