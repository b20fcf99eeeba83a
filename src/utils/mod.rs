//! Utility functions for alias generation and database error handling.
//!
//! - [`alias_generator`] - Random alias generation
//! - [`db_error`] - SQLx error classification

pub mod alias_generator;
pub mod db_error;
