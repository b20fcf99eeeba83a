//! HTTP request handlers for API endpoints.

pub mod ping;
pub mod redirect;
pub mod save;

pub use ping::ping_handler;
pub use redirect::{not_found_handler, redirect_handler};
pub use save::save_handler;
