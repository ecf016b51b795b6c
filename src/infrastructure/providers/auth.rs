//! # Provider Authentication
//!
//! Authentication schemes for partner APIs and the [`TokenCache`] holding
//! bearer tokens issued by partners that require a login call.
//!
//! The cache is an explicit object created by the composition root and
//! shared by `Arc` with every client that needs it. Tokens are created on
//! first use and dropped once their time-to-live elapses.

use crate::domain::value_objects::ProviderName;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Default lifetime of an issued token when the partner does not say.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3_600;

/// How a client authenticates against its partner.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum AuthScheme {
    /// No authentication.
    #[default]
    None,
    /// HTTP Basic with login and password.
    Basic {
        /// Login.
        login: String,
        /// Password.
        password: String,
    },
    /// Static key sent in a header, e.g. `X-Api-Key: <key>`.
    ApiKey {
        /// Header name.
        #[serde(default = "default_api_key_header")]
        header: String,
        /// Key value, sent verbatim.
        key: String,
    },
    /// Bearer token issued by a login endpoint and cached until expiry.
    IssuedToken {
        /// Login path relative to the base URL.
        login_path: String,
        /// Login.
        login: String,
        /// Password.
        password: String,
        /// Token lifetime when the login response carries none.
        #[serde(default = "default_token_ttl_secs")]
        ttl_secs: u64,
    },
}

fn default_api_key_header() -> String {
    "X-Api-Key".to_string()
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl AuthScheme {
    /// Returns the scheme name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::ApiKey { .. } => "api_key",
            Self::IssuedToken { .. } => "issued_token",
        }
    }
}

// Secrets never reach logs.
impl fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { login, .. } => f
                .debug_struct("Basic")
                .field("login", login)
                .field("password", &"***")
                .finish(),
            Self::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .field("key", &"***")
                .finish(),
            Self::IssuedToken {
                login_path,
                login,
                ttl_secs,
                ..
            } => f
                .debug_struct("IssuedToken")
                .field("login_path", login_path)
                .field("login", login)
                .field("password", &"***")
                .field("ttl_secs", ttl_secs)
                .finish(),
        }
    }
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Cache of partner-issued bearer tokens, keyed by provider.
#[derive(Default)]
pub struct TokenCache {
    entries: Mutex<HashMap<ProviderName, CachedToken>>,
}

impl TokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token if it has not expired. Expired entries are
    /// removed.
    #[must_use]
    pub fn get(&self, provider: ProviderName) -> Option<String> {
        let mut entries = self.entries.lock();
        match entries.get(&provider) {
            Some(cached) if cached.expires_at > Instant::now() => Some(cached.token.clone()),
            Some(_) => {
                entries.remove(&provider);
                None
            }
            None => None,
        }
    }

    /// Stores a token for `ttl`.
    pub fn put(&self, provider: ProviderName, token: impl Into<String>, ttl: Duration) {
        self.entries.lock().insert(
            provider,
            CachedToken {
                token: token.into(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drops the provider's token, e.g. after the partner rejected it.
    pub fn invalidate(&self, provider: ProviderName) {
        self.entries.lock().remove(&provider);
    }

    /// Returns the number of cached tokens, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if no token is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<ProviderName> = self.entries.lock().keys().copied().collect();
        f.debug_struct("TokenCache")
            .field("providers", &providers)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_secrets() {
        let scheme = AuthScheme::Basic {
            login: "aggregator".to_string(),
            password: "s3cret".to_string(),
        };
        let rendered = format!("{:?}", scheme);
        assert!(rendered.contains("aggregator"));
        assert!(!rendered.contains("s3cret"));

        let scheme = AuthScheme::ApiKey {
            header: "X-Api-Key".to_string(),
            key: "k-123".to_string(),
        };
        assert!(!format!("{:?}", scheme).contains("k-123"));
    }

    #[test]
    fn deserializes_tagged_scheme() {
        let scheme: AuthScheme =
            serde_json::from_str(r#"{"scheme": "api_key", "key": "abc"}"#).unwrap();
        assert_eq!(
            scheme,
            AuthScheme::ApiKey {
                header: "X-Api-Key".to_string(),
                key: "abc".to_string()
            }
        );

        let scheme: AuthScheme = serde_json::from_str(
            r#"{"scheme": "issued_token", "login_path": "/auth", "login": "l", "password": "p"}"#,
        )
        .unwrap();
        assert_eq!(scheme.name(), "issued_token");
    }

    #[tokio::test(start_paused = true)]
    async fn token_expires_after_ttl() {
        let cache = TokenCache::new();
        cache.put(ProviderName::Euroasia, "t-1", Duration::from_secs(60));
        assert_eq!(cache.get(ProviderName::Euroasia).as_deref(), Some("t-1"));
        assert_eq!(cache.get(ProviderName::Neo), None);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get(ProviderName::Euroasia), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_drops_token() {
        let cache = TokenCache::new();
        cache.put(ProviderName::Euroasia, "t-1", Duration::from_secs(60));
        cache.invalidate(ProviderName::Euroasia);
        assert!(cache.get(ProviderName::Euroasia).is_none());
    }
}
