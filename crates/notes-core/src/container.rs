//! Explicit wiring of the client components.
//!
//! Front-ends build one [`AppContainer`] at startup and hand its parts to
//! whatever needs them; nothing here is a process-wide singleton.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::{token_provider, TokenStore};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::repository::{AuthRepository, HttpAuthRepository, HttpNotesRepository, NotesRepository};
use crate::state::{AuthState, NotesState};
use crate::widget::{SharedStore, TimelineReloader, WidgetCache};

#[derive(Clone)]
pub struct AppContainer {
    pub api: ApiClient,
    pub auth_repository: Arc<dyn AuthRepository>,
    pub notes_repository: Arc<dyn NotesRepository>,
    pub token_store: Arc<dyn TokenStore>,
    pub widget_cache: WidgetCache,
}

impl AppContainer {
    pub fn new(
        config: &ClientConfig,
        token_store: Arc<dyn TokenStore>,
        shared_store: Arc<dyn SharedStore>,
        reloader: Arc<dyn TimelineReloader>,
    ) -> Result<Self> {
        let api = ApiClient::new(&config.api_base_url, token_provider(token_store.clone()))?;
        tracing::debug!("Using notes API at {}", api.base_url());

        Ok(Self {
            auth_repository: Arc::new(HttpAuthRepository::new(api.clone())),
            notes_repository: Arc::new(HttpNotesRepository::new(
                api.clone(),
                config.export_dir.clone(),
            )),
            widget_cache: WidgetCache::new(shared_store, reloader),
            token_store,
            api,
        })
    }

    pub fn notes_state(&self) -> NotesState {
        NotesState::new(self.notes_repository.clone(), self.widget_cache.clone())
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::new(self.auth_repository.clone(), self.token_store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::error::Error;
    use crate::widget::{MemorySharedStore, NoopReloader};

    #[test]
    fn container_wires_components_from_config() {
        let config = ClientConfig::default();
        let container = AppContainer::new(
            &config,
            Arc::new(MemoryTokenStore::with_token("t")),
            Arc::new(MemorySharedStore::new()),
            Arc::new(NoopReloader),
        )
        .unwrap();

        assert_eq!(container.api.base_url(), "http://127.0.0.1:8000");
        assert!(container.auth_state().is_authenticated());
        assert!(container.notes_state().notes().is_empty());
        assert!(container.widget_cache.load().is_empty());
    }

    #[test]
    fn invalid_base_url_fails_construction() {
        let config = ClientConfig {
            api_base_url: "ftp://nope".to_string(),
            ..ClientConfig::default()
        };
        let result = AppContainer::new(
            &config,
            Arc::new(MemoryTokenStore::new()),
            Arc::new(MemorySharedStore::new()),
            Arc::new(NoopReloader),
        );
        assert!(matches!(result, Err(Error::Api(_))));
    }
}
