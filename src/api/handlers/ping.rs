//! Handler for the liveness endpoint.

/// Liveness check.
///
/// # Endpoint
///
/// `GET /ping`
///
/// Always answers `200 OK` with the plain-text body `PONG`.
pub async fn ping_handler() -> &'static str {
    "PONG"
}
