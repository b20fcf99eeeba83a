//! Wraps bare error responses in the JSON envelope.
//!
//! Handlers already answer with the envelope. This catches the rest: `405`
//! from method routing, `408` from the timeout layer, `413` from the body
//! limit, all of which come back empty or as plain text.

use axum::{
    Json,
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::response::Envelope;

pub async fn layer(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let message = status
        .canonical_reason()
        .unwrap_or("error")
        .to_ascii_lowercase();

    let (parts, _) = response.into_parts();
    let mut wrapped = (status, Json(Envelope::error(message))).into_response();

    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            wrapped.headers_mut().append(name.clone(), value.clone());
        }
    }

    wrapped
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
