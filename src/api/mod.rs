//! HTTP API layer.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies and the response envelope
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, tracing and request processing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
