//! DTOs for the save endpoint.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use crate::api::dto::response::{Envelope, validation_message};

/// Aliases that would be shadowed by fixed routes.
pub const RESERVED_ALIASES: &[&str] = &["url", "ping"];

/// Request to save a URL under an optional alias.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// The original URL (required, must parse as an absolute URL).
    #[validate(required, custom(function = "validate_target_url"))]
    pub url: Option<String>,

    /// Optional alias; generated when absent or empty.
    #[validate(custom(function = "validate_alias"))]
    pub alias: Option<String>,
}

/// Response for a saved URL: `{"status": "OK", "alias": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub alias: String,
}

impl SaveRequest {
    pub fn new(url: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            url: Some(url.into()),
            alias,
        }
    }

    /// Runs the field rules and renders failures as one client-facing message.
    pub fn check(&self) -> Result<(), String> {
        self.validate()
            .map_err(|errors| validation_message(&errors))
    }
}

impl SaveResponse {
    pub fn ok(alias: String) -> Self {
        Self {
            envelope: Envelope::ok(),
            alias,
        }
    }
}

fn validate_target_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::new("required"));
    }

    // The parser silently drops these, but the raw string is what gets stored
    // and later sent back in `Location`.
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::new("url"));
    }

    Url::parse(url)
        .map(|_| ())
        .map_err(|_| ValidationError::new("url"))
}

fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    if RESERVED_ALIASES.contains(&alias) {
        return Err(ValidationError::new("reserved"));
    }

    Ok(())
}
