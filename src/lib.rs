//! # Link Shortener
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The stored URL record and the store trait
//! - **Application Layer** ([`application`]) - Alias resolution and credential checks
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite storage
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//!
//! ## Endpoints
//!
//! - `POST /url` - Save a URL under a given or random alias (basic auth)
//! - `GET /{alias}` - `302` redirect to the stored URL
//! - `GET /ping` - Liveness check
//!
//! ## Quick Start
//!
//! ```bash
//! export HTTP_USER=admin
//! export HTTP_PASSWORD=secret
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod graceful_shutdown;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::{AppError, StorageError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, UrlService};
    pub use crate::domain::entities::UrlRecord;
    pub use crate::domain::repositories::UrlStore;
    pub use crate::error::{AppError, StorageError};
    pub use crate::infrastructure::persistence::SqliteUrlStore;
    pub use crate::state::AppState;
    pub use crate::utils::alias_generator::AliasGenerator;
}
