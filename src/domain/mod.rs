//! Domain layer containing the persisted entity and the storage contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependencies on the HTTP or persistence layers;
//! implementations of [`repositories::UrlStore`] live in
//! [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
