//! Handler for alias redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::error::{AppError, StorageError};
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Response Codes
///
/// - **302 Found**: `Location` holds the stored URL
/// - **404 Not Found**: empty alias or nothing stored under it
/// - **500 Internal Server Error**: storage failure
#[tracing::instrument(name = "redirect", skip_all, fields(op = "handlers.url.redirect", alias = %alias))]
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if alias.is_empty() {
        info!("alias is empty");
        return Err(AppError::not_found("not found"));
    }

    let url = match state.url_service.resolve(&alias).await {
        Ok(url) => url,
        Err(StorageError::UrlNotFound) => {
            info!("url not found");
            return Err(AppError::not_found("not found"));
        }
        Err(e) => {
            error!(error = %e, "failed to get url");
            return Err(AppError::internal("internal error"));
        }
    };

    let location = HeaderValue::try_from(url.as_str()).map_err(|e| {
        error!(error = %e, url = %url, "stored url is not a valid Location header");
        AppError::internal("internal error")
    })?;

    info!(url = %url, "got url");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Fallback for requests that match no route.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("not found")
}
