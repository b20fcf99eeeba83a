//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `HTTP_USER` - Basic-auth user for `POST /url`
//! - `HTTP_PASSWORD` or `HTTP_PASSWORD_FILE` - Basic-auth password; the file
//!   variant takes priority and is read once at startup
//!
//! ## Optional Variables
//!
//! - `APP_ENV` - `local`, `dev` or `prod` (default: `local`)
//! - `HTTP_ADDRESS` - Bind address (default: `127.0.0.1:8080`)
//! - `HTTP_TIMEOUT` - Whole-request timeout in seconds (default: 4)
//! - `HTTP_IDLE_TIMEOUT` - Seconds a connection may wait for the next complete
//!   request header before it is closed (default: 60)
//! - `STORAGE_PATH` - SQLite file (default: `./storage/storage.db`)
//! - `STORAGE_TIMEOUT` - Per storage call deadline in seconds (default: 2)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `ALIAS_LENGTH` - Generated alias length (default: 6)
//! - `ALIAS_ALPHABET` - Generated alias alphabet (default: `A-Za-z0-9`)
//! - `RUST_LOG` - Overrides the environment's log level

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, DEFAULT_ALPHABET};

const DEFAULT_STORAGE_PATH: &str = "./storage/storage.db";

/// Deployment environment; selects log verbosity and format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Local,
    Dev,
    Prod,
}

impl AppEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnv::Local => "local",
            AppEnv::Dev => "dev",
            AppEnv::Prod => "prod",
        }
    }
}

impl FromStr for AppEnv {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(AppEnv::Local),
            "dev" => Ok(AppEnv::Dev),
            "prod" => Ok(AppEnv::Prod),
            other => anyhow::bail!("APP_ENV must be 'local', 'dev' or 'prod', got '{other}'"),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration value that must not show up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub env: AppEnv,
    pub http_address: String,
    pub http_timeout: Duration,
    pub http_idle_timeout: Duration,
    pub storage_path: PathBuf,
    pub storage_timeout: Duration,
    pub db_max_connections: u32,
    pub alias_length: usize,
    pub alias_alphabet: String,
    pub http_user: String,
    pub http_password: Secret,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `APP_ENV` is unknown or the credentials are missing.
    pub fn from_env() -> Result<Self> {
        let env = match env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => AppEnv::Local,
        };

        let http_address =
            env::var("HTTP_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let http_timeout = Duration::from_secs(parse_or("HTTP_TIMEOUT", 4));
        let http_idle_timeout = Duration::from_secs(parse_or("HTTP_IDLE_TIMEOUT", 60));
        let storage_path = storage_path_from_env();
        let storage_timeout = Duration::from_secs(parse_or("STORAGE_TIMEOUT", 2));
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", 5);
        let alias_length = parse_or("ALIAS_LENGTH", DEFAULT_ALIAS_LENGTH);
        let alias_alphabet =
            env::var("ALIAS_ALPHABET").unwrap_or_else(|_| DEFAULT_ALPHABET.to_string());

        let http_user = env::var("HTTP_USER").context("HTTP_USER must be set")?;
        let http_password = Self::load_password()?;

        Ok(Self {
            env,
            http_address,
            http_timeout,
            http_idle_timeout,
            storage_path,
            storage_timeout,
            db_max_connections,
            alias_length,
            alias_alphabet,
            http_user,
            http_password,
        })
    }

    /// Loads the basic-auth password.
    ///
    /// Priority:
    /// 1. Contents of the file named by `HTTP_PASSWORD_FILE` (trailing newline stripped)
    /// 2. `HTTP_PASSWORD` environment variable
    fn load_password() -> Result<Secret> {
        if let Ok(path) = env::var("HTTP_PASSWORD_FILE") {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read HTTP_PASSWORD_FILE '{path}'"))?;
            return Ok(Secret::new(contents.trim_end_matches(['\r', '\n'])));
        }

        env::var("HTTP_PASSWORD")
            .map(Secret::new)
            .context("HTTP_PASSWORD or HTTP_PASSWORD_FILE must be set")
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `http_address` is not `host:port`
    /// - a timeout is zero
    /// - `db_max_connections` is zero
    /// - `alias_length` is zero or above 64
    /// - `alias_alphabet`, `http_user` or `http_password` is empty
    pub fn validate(&self) -> Result<()> {
        if !self.http_address.contains(':') {
            anyhow::bail!(
                "HTTP_ADDRESS must be in format 'host:port', got '{}'",
                self.http_address
            );
        }

        if self.http_timeout.is_zero() {
            anyhow::bail!("HTTP_TIMEOUT must be greater than 0");
        }

        if self.http_idle_timeout.is_zero() {
            anyhow::bail!("HTTP_IDLE_TIMEOUT must be greater than 0");
        }

        if self.storage_timeout.is_zero() {
            anyhow::bail!("STORAGE_TIMEOUT must be greater than 0");
        }

        if self.storage_path.as_os_str().is_empty() {
            anyhow::bail!("STORAGE_PATH must not be empty");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        if self.alias_length == 0 || self.alias_length > 64 {
            anyhow::bail!(
                "ALIAS_LENGTH must be between 1 and 64, got {}",
                self.alias_length
            );
        }

        if self.alias_alphabet.is_empty() {
            anyhow::bail!("ALIAS_ALPHABET must not be empty");
        }

        if self.http_user.is_empty() {
            anyhow::bail!("HTTP_USER must not be empty");
        }

        if self.http_password.expose().is_empty() {
            anyhow::bail!("HTTP_PASSWORD must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Environment: {}", self.env);
        tracing::info!("  Listen address: {}", self.http_address);
        tracing::info!("  HTTP timeout: {:?}", self.http_timeout);
        tracing::info!("  HTTP idle timeout: {:?}", self.http_idle_timeout);
        tracing::info!("  Storage: {}", self.storage_path.display());
        tracing::info!("  Storage timeout: {:?}", self.storage_timeout);
        tracing::info!("  Alias length: {}", self.alias_length);
        tracing::info!("  Basic auth user: {}", self.http_user);
    }
}

/// Storage path from `STORAGE_PATH`, falling back to the default location.
pub fn storage_path_from_env() -> PathBuf {
    env::var("STORAGE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH))
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
