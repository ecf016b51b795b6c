//! # HTTP Provider Client
//!
//! The [`ProviderClient`] used for every partner in production.
//!
//! One instance per partner, each with:
//! - its own base URL and timeout
//! - HTTP Basic, header API key or issued-token authentication
//! - JSON request bodies; JSON or plain-text responses
//!
//! Non-2xx statuses are returned as a [`ProviderReply`], not as errors, so
//! callers see exactly what the partner answered.
//!
//! # Examples
//!
//! ```ignore
//! use osago_quotes::config::ProviderConfig;
//! use osago_quotes::infrastructure::providers::http_client::HttpProviderClient;
//!
//! let client = HttpProviderClient::new(ProviderName::Neo, &config, tokens.clone())?;
//! let reply = client.call(request).await?;
//! ```

use crate::config::ProviderConfig;
use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::auth::{AuthScheme, TokenCache};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::{ProviderClient, ProviderReply, ProviderRequest};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Login response of partners using issued tokens.
#[derive(Debug, Deserialize)]
struct IssuedTokenResponse {
    #[serde(alias = "token", alias = "accessToken")]
    access_token: String,
    #[serde(default, alias = "expiresIn")]
    expires_in: Option<u64>,
}

/// HTTP client for one partner API.
#[derive(Debug, Clone)]
pub struct HttpProviderClient {
    provider: ProviderName,
    client: Client,
    base_url: String,
    auth: AuthScheme,
    timeout_ms: u64,
    tokens: Arc<TokenCache>,
}

impl HttpProviderClient {
    /// Creates a client for the provider endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the HTTP client cannot be built.
    pub fn new(
        provider: ProviderName,
        config: &ProviderConfig,
        tokens: Arc<TokenCache>,
    ) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ProviderError::internal(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            provider,
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: config.auth.clone(),
            timeout_ms: config.timeout_ms,
            tokens,
        })
    }

    /// Returns the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Applies the configured authentication to a request.
    async fn authorize(&self, builder: RequestBuilder) -> ProviderResult<RequestBuilder> {
        match &self.auth {
            AuthScheme::None => Ok(builder),
            AuthScheme::Basic { login, password } => Ok(builder.basic_auth(login, Some(password))),
            AuthScheme::ApiKey { header, key } => Ok(builder.header(header.as_str(), key.as_str())),
            AuthScheme::IssuedToken {
                login_path,
                login,
                password,
                ttl_secs,
            } => {
                let token = match self.tokens.get(self.provider) {
                    Some(token) => token,
                    None => self.issue_token(login_path, login, password, *ttl_secs).await?,
                };
                Ok(builder.bearer_auth(token))
            }
        }
    }

    /// Logs in and caches the issued token.
    async fn issue_token(
        &self,
        login_path: &str,
        login: &str,
        password: &str,
        ttl_secs: u64,
    ) -> ProviderResult<String> {
        debug!(provider = %self.provider, "requesting access token");
        let response = self
            .client
            .post(self.url(login_path))
            .json(&json!({ "login": login, "password": password }))
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::authentication(format!(
                "token request rejected with HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let issued: IssuedTokenResponse = response.json().await.map_err(|e| {
            ProviderError::authentication(format!("unreadable token response: {}", e))
        })?;
        let ttl = Duration::from_secs(issued.expires_in.unwrap_or(ttl_secs));
        self.tokens.put(self.provider, issued.access_token.clone(), ttl);
        Ok(issued.access_token)
    }

    /// Reads status and body; non-JSON bodies become a JSON string.
    async fn read_reply(&self, response: Response) -> ProviderResult<ProviderReply> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(ProviderReply::new(status, body))
    }

    /// Maps a reqwest error to a ProviderError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::timeout_with_duration(
                format!("{} request timed out", self.provider),
                self.timeout_ms,
            )
        } else if error.is_connect() {
            ProviderError::connection(format!("connection failed: {}", error))
        } else if error.is_builder() {
            ProviderError::invalid_request(format!("request could not be built: {}", error))
        } else if error.is_decode() {
            ProviderError::protocol(format!("response could not be decoded: {}", error))
        } else {
            ProviderError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    fn provider(&self) -> ProviderName {
        self.provider
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn call(&self, request: ProviderRequest) -> ProviderResult<ProviderReply> {
        let started = Instant::now();
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request.path));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let builder = self.authorize(builder).await?;

        let response = builder.send().await.map_err(|e| self.map_reqwest_error(e))?;
        let reply = self.read_reply(response).await?;

        if matches!(self.auth, AuthScheme::IssuedToken { .. }) && reply.status == 401 {
            warn!(provider = %self.provider, "issued token rejected, dropping it");
            self.tokens.invalidate(self.provider);
        }

        debug!(
            provider = %self.provider,
            method = %request.method,
            path = %request.path,
            status = reply.status,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "provider call finished"
        );
        Ok(reply)
    }
}
