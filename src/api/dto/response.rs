//! Uniform response envelope shared by every handler.

use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

/// Outcome marker of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// `{"status": "OK" | "Error", "error"?: string}`.
///
/// Handler-specific fields are added by flattening this struct into the
/// handler's response type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(message.into()),
        }
    }
}

/// Builds one message per failing field, joined by `", "`.
///
/// Fields are listed in name order so the message is stable.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let mut messages = Vec::new();
    for (field, kind) in fields {
        let ValidationErrorsKind::Field(field_errors) = kind else {
            messages.push(format!("field {field} is not valid"));
            continue;
        };

        for error in field_errors {
            let message = match error.code.as_ref() {
                "required" => format!("field {field} is a required field"),
                "url" => format!("field {field} is not a valid URL"),
                "reserved" => format!("field {field} is reserved"),
                _ => format!("field {field} is not valid"),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}
