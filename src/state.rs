//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, UrlService};

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            url_service,
            auth_service,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over `store` with a default generator, a one-second storage
    /// deadline and the credentials `user` / `secret`.
    pub(crate) fn with_store(store: impl crate::domain::repositories::UrlStore + 'static) -> Self {
        use crate::utils::alias_generator::AliasGenerator;
        use std::time::Duration;

        let url_service = UrlService::new(
            Arc::new(store),
            AliasGenerator::default(),
            Duration::from_secs(1),
        );

        Self::new(
            Arc::new(url_service),
            Arc::new(AuthService::new("user", "secret")),
        )
    }
}
