//! Error types shared across layers.
//!
//! - [`AppError`] is the HTTP-facing error; it renders as the JSON envelope.
//! - [`StorageError`] is returned by [`crate::domain::repositories::UrlStore`]
//!   implementations and carries the two distinguished storage conditions.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::time::Duration;
use thiserror::Error;

use crate::api::dto::response::Envelope;

/// Errors produced by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("url not found")]
    UrlNotFound,

    #[error("url exists")]
    UrlExists,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to prepare storage path: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Errors rendered to HTTP clients.
///
/// Every variant renders as `{"status": "Error", "error": "<message>"}` with the
/// status code matching the error kind.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Realm announced in `WWW-Authenticate` on 401 responses.
pub const AUTH_REALM: &str = r#"Basic realm="link-shortener""#;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let is_unauthorized = matches!(self, AppError::Unauthorized { .. });

        let mut response = (status, Json(Envelope::error(self.to_string()))).into_response();

        if is_unauthorized {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(AUTH_REALM),
            );
        }

        response
    }
}
