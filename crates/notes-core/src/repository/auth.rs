//! Account endpoints.

use async_trait::async_trait;
use reqwest::Method;

use crate::api::dto::{CredentialsDto, TokenDto, UserDto};
use crate::api::ApiClient;
use crate::error::Result;
use crate::models::User;

const SIGNUP_PATH: &str = "/auth/signup";
const LOGIN_PATH: &str = "/auth/login";
const ME_PATH: &str = "/auth/me";

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Registers an account. Any 2xx counts as success; the body is ignored.
    async fn signup(&self, email: &str, password: &str) -> Result<()>;

    /// Exchanges credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<String>;

    /// Fetches the profile behind the current token.
    async fn me(&self) -> Result<User>;
}

#[derive(Debug, Clone)]
pub struct HttpAuthRepository {
    api: ApiClient,
}

impl HttpAuthRepository {
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn signup(&self, email: &str, password: &str) -> Result<()> {
        let body = CredentialsDto { email, password };
        self.api
            .request_void(SIGNUP_PATH, Method::POST, Some(&body))
            .await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = CredentialsDto { email, password };
        let token: TokenDto = self
            .api
            .request(LOGIN_PATH, Method::POST, &[], Some(&body))
            .await?;
        tracing::debug!(token_type = %token.token_type, "received access token");
        Ok(token.access_token)
    }

    async fn me(&self) -> Result<User> {
        let user: UserDto = self
            .api
            .request::<_, ()>(ME_PATH, Method::GET, &[], None)
            .await?;
        Ok(user.into())
    }
}
