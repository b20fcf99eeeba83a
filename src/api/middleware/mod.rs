//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, request ids, error envelopes, panic recovery and
//! observability.

pub mod auth;
pub mod envelope;
pub mod recovery;
pub mod request_id;
pub mod tracing;
