//! Bearer token persistence seam.
//!
//! The token is the only session state the client keeps: present means
//! signed in, absent means signed out. Platform front-ends provide the
//! secure backing store; [`MemoryTokenStore`] serves tests and ephemeral use.

use std::sync::{Arc, Mutex};

use crate::api::TokenProvider;
use crate::error::{Error, Result};

/// Keychain service under which the token is stored.
pub const TOKEN_SERVICE_NAME: &str = "NotesCleanApp.Token";
/// Keychain account under which the token is stored.
pub const TOKEN_ACCOUNT_NAME: &str = "authToken";

pub trait TokenStore: Send + Sync {
    fn save_token(&self, token: &str) -> Result<()>;
    fn read_token(&self) -> Result<Option<String>>;
    fn clear_token(&self) -> Result<()>;
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save_token(&self, token: &str) -> Result<()> {
        let token = validate_token(token)?;
        let mut guard = self
            .token
            .lock()
            .map_err(|error| Error::SecureStorage(error.to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn read_token(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|error| Error::SecureStorage(error.to_string()))?;
        Ok(guard.clone())
    }

    fn clear_token(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|error| Error::SecureStorage(error.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Rejects tokens that would be sent as an empty bearer credential.
///
/// Accepted tokens are returned untouched; they are opaque server strings.
pub fn validate_token(token: &str) -> Result<&str> {
    if token.trim().is_empty() {
        return Err(Error::SecureStorage(
            "token value must not be empty".to_string(),
        ));
    }
    Ok(token)
}

/// Adapts a token store into the transport client's token accessor.
///
/// Storage failures are logged and treated as "no token".
pub fn token_provider(store: Arc<dyn TokenStore>) -> TokenProvider {
    Arc::new(move || match store.read_token() {
        Ok(token) => token,
        Err(error) => {
            tracing::warn!("Failed to read stored token: {}", error);
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl TokenStore for BrokenStore {
        fn save_token(&self, _token: &str) -> Result<()> {
            Err(Error::SecureStorage("locked".to_string()))
        }

        fn read_token(&self) -> Result<Option<String>> {
            Err(Error::SecureStorage("locked".to_string()))
        }

        fn clear_token(&self) -> Result<()> {
            Err(Error::SecureStorage("locked".to_string()))
        }
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.read_token().unwrap(), None);

        store.save_token("abc").unwrap();
        assert_eq!(store.read_token().unwrap().as_deref(), Some("abc"));

        store.clear_token().unwrap();
        assert_eq!(store.read_token().unwrap(), None);
    }

    #[test]
    fn token_is_stored_byte_for_byte() {
        let store = MemoryTokenStore::new();
        store.save_token(" abc\n").unwrap();
        assert_eq!(store.read_token().unwrap().as_deref(), Some(" abc\n"));
    }

    #[test]
    fn empty_token_is_rejected() {
        let store = MemoryTokenStore::new();
        let error = store.save_token("   ").unwrap_err();
        assert!(error.to_string().contains("must not be empty"));
    }

    #[test]
    fn token_provider_reads_latest_value() {
        let store = Arc::new(MemoryTokenStore::new());
        let provider = token_provider(store.clone());
        assert_eq!(provider(), None);

        store.save_token("first").unwrap();
        assert_eq!(provider().as_deref(), Some("first"));

        store.save_token("second").unwrap();
        assert_eq!(provider().as_deref(), Some("second"));
    }

    #[test]
    fn token_provider_degrades_storage_errors_to_none() {
        let provider = token_provider(Arc::new(BrokenStore));
        assert_eq!(provider(), None);
    }
}
