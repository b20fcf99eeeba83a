//! Application layer services.
//!
//! Services sit between the HTTP handlers and the storage layer.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Alias assignment, saving and lookup
//! - [`services::auth_service::AuthService`] - Basic-auth credential check

pub mod services;
