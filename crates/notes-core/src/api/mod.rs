//! HTTP transport for the notes backend.
//!
//! [`ApiClient`] is the single point of outbound communication: it builds
//! URLs from the configured base, attaches the bearer token supplied by the
//! injected accessor, classifies the response status and decodes JSON. It
//! keeps no state of its own and performs exactly one attempt per call.

pub mod dates;
pub mod dto;

use std::fmt;
use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::util::{compact_text, is_http_url};

pub use reqwest::Method;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Paths whose request bodies carry credentials and are never logged.
const REDACTED_BODY_PATHS: &[&str] = &["/auth/login", "/auth/signup"];

/// Supplies the current bearer token, if any, at request time.
pub type TokenProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Stateless HTTP client for the notes API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    token_provider: TokenProvider,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds a client for an explicit API base URL.
    pub fn new(base_url: impl AsRef<str>, token_provider: TokenProvider) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(ApiError::Transport)?;
        Self::with_http_client(base_url, token_provider, client)
    }

    /// Builds a client around a preconfigured `reqwest::Client`.
    pub fn with_http_client(
        base_url: impl AsRef<str>,
        token_provider: TokenProvider,
        client: reqwest::Client,
    ) -> ApiResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            client,
            token_provider,
        })
    }

    /// Returns the normalized API base URL used by this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` and `query` against the base URL without sending anything.
    pub fn url_for(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<Url> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut url =
            Url::parse(&raw).map_err(|error| ApiError::InvalidUrl(format!("{raw}: {error}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sends a request and decodes the 2xx body as `T`.
    pub async fn request<T, B>(
        &self,
        path: &str,
        method: Method,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self.send(path, method, query, encode_body(body)?).await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decoding)
    }

    /// Sends a request whose success is signalled by status alone.
    pub async fn request_void<B>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
    ) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(path, method, &[], encode_body(body)?).await?;
        Ok(())
    }

    /// Sends a request and returns the 2xx body unparsed.
    pub async fn request_raw_bytes(
        &self,
        path: &str,
        method: Method,
        query: &[(&str, &str)],
    ) -> ApiResult<Vec<u8>> {
        self.send(path, method, query, None).await
    }

    async fn send(
        &self,
        path: &str,
        method: Method,
        query: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> ApiResult<Vec<u8>> {
        let url = self.url_for(path, query)?;
        let token = (self.token_provider)();

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, JSON_MEDIA_TYPE);
        if let Some(token) = token.as_deref() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        tracing::debug!(
            method = %method,
            url = %url,
            authorized = token.is_some(),
            body = %describe_request_body(url.path(), body.as_deref()),
            "api request"
        );

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(body);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        let final_url = response.url().clone();
        let bytes = response.bytes().await.map_err(ApiError::Transport)?;

        tracing::debug!(
            status = status.as_u16(),
            url = %final_url,
            body = %describe_response_body(&bytes),
            "api response"
        );

        classify_status(status, &bytes)?;
        Ok(bytes.to_vec())
    }
}

/// Maps a response status onto the error taxonomy.
///
/// 401 wins over any body content, including a body that would decode.
pub fn classify_status(status: StatusCode, body: &[u8]) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    Err(ApiError::BadStatus {
        status: status.as_u16(),
        body: String::from_utf8(body.to_vec()).ok(),
    })
}

pub fn normalize_base_url(raw: &str) -> ApiResult<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(ApiError::InvalidUrl(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(&base) {
        return Err(ApiError::InvalidUrl(format!(
            "API base URL must include http:// or https://: {base}"
        )));
    }
    Ok(base)
}

fn encode_body<B: Serialize + ?Sized>(body: Option<&B>) -> ApiResult<Option<Vec<u8>>> {
    body.map(serde_json::to_vec)
        .transpose()
        .map_err(ApiError::Encoding)
}

fn describe_request_body(path: &str, body: Option<&[u8]>) -> String {
    let Some(body) = body else {
        return "-".to_string();
    };
    let path = path.to_ascii_lowercase();
    if REDACTED_BODY_PATHS.iter().any(|redacted| path.contains(redacted)) {
        return "<redacted>".to_string();
    }
    describe_response_body(body)
}

fn describe_response_body(body: &[u8]) -> String {
    std::str::from_utf8(body).map_or_else(|_| "<binary>".to_string(), compact_text)
}
