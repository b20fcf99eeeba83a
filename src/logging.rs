//! Tracing subscriber setup.
//!
//! | `APP_ENV` | Format | Default level |
//! |-----------|--------|---------------|
//! | `local`   | text   | `debug`       |
//! | `dev`     | JSON   | `debug`       |
//! | `prod`    | JSON   | `info`        |
//!
//! `RUST_LOG` overrides the default level.

use tracing_subscriber::EnvFilter;

use crate::config::AppEnv;

fn default_directive(env: AppEnv) -> &'static str {
    match env {
        AppEnv::Local | AppEnv::Dev => "debug",
        AppEnv::Prod => "info",
    }
}

/// Builds the log filter, preferring `RUST_LOG` when it is set and valid.
pub fn filter(env: AppEnv) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(env)))
}

/// Installs the global subscriber for the given environment.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(env: AppEnv) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(env))
        .with_level(true)
        .with_target(true);

    match env {
        AppEnv::Local => builder.with_ansi(true).try_init(),
        AppEnv::Dev | AppEnv::Prod => builder.json().with_ansi(false).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
