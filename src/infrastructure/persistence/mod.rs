//! SQLite storage implementations.
//!
//! Concrete implementations of domain storage traits using SQLx.
//!
//! # Stores
//!
//! - [`SqliteUrlStore`] - Alias → URL storage and lookup

pub mod sqlite_url_store;

pub use sqlite_url_store::SqliteUrlStore;
