use std::sync::Arc;

use crate::auth::TokenStore;
use crate::error::Error;
use crate::models::User;
use crate::repository::AuthRepository;

pub struct AuthState {
    repo: Arc<dyn AuthRepository>,
    tokens: Arc<dyn TokenStore>,
    is_authenticated: bool,
    is_loading: bool,
    error: Option<String>,
}

impl AuthState {
    /// Starts signed in exactly when a token is already stored.
    pub fn new(repo: Arc<dyn AuthRepository>, tokens: Arc<dyn TokenStore>) -> Self {
        let is_authenticated = match tokens.read_token() {
            Ok(token) => token.is_some(),
            Err(error) => {
                tracing::warn!("Failed to read stored token: {}", error);
                false
            }
        };
        Self {
            repo,
            tokens,
            is_authenticated,
            is_loading: false,
            error: None,
        }
    }

    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Signs in and persists the token. Blank credentials are ignored.
    pub async fn login(&mut self, email: &str, password: &str) {
        if email.is_empty() || password.is_empty() {
            return;
        }
        self.is_loading = true;
        self.error = None;
        if let Err(error) = self.sign_in(email, password).await {
            self.record_error("sign in", &error);
        }
        self.is_loading = false;
    }

    /// Registers, then signs in with the same credentials.
    pub async fn signup(&mut self, email: &str, password: &str) {
        if email.is_empty() || password.is_empty() {
            return;
        }
        self.is_loading = true;
        self.error = None;
        let outcome = match self.repo.signup(email, password).await {
            Ok(()) => {
                tracing::info!("Account created for {}; signing in", email);
                self.sign_in(email, password).await
            }
            Err(error) => Err(error),
        };
        if let Err(error) = outcome {
            self.record_error("sign up", &error);
        }
        self.is_loading = false;
    }

    /// Confirms the session against the server. Does not change auth state.
    pub async fn refresh_me(&self) -> Option<User> {
        match self.repo.me().await {
            Ok(user) => {
                tracing::info!("Session belongs to {}", user.email);
                Some(user)
            }
            Err(error) => {
                tracing::warn!("Failed to fetch profile: {}", error);
                None
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(error) = self.tokens.clear_token() {
            tracing::warn!("Failed to clear stored token: {}", error);
        }
        self.is_authenticated = false;
        tracing::info!("Signed out");
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), Error> {
        let token = self.repo.login(email, password).await?;
        self.tokens.save_token(&token)?;
        self.is_authenticated = true;
        tracing::info!("Signed in as {}", email);
        Ok(())
    }

    fn record_error(&mut self, operation: &str, error: &Error) {
        tracing::warn!("Failed to {}: {}", operation, error);
        self.error = Some(error.to_string());
    }
}
