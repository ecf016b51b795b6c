//! # Session Store Trait
//!
//! Port definition for the key-value store holding resolved identities
//! between Find and Calc.
//!
//! Values are opaque strings (JSON in practice) with a time to live. There is
//! no delete: expiry is the only way a session goes away.
//!
//! # Examples
//!
//! ```ignore
//! use osago_quotes::infrastructure::session::SessionStore;
//!
//! store.put("osago:session:6f1c...", payload, Duration::from_secs(1800)).await?;
//! let payload = store.get("osago:session:6f1c...").await?;
//! ```

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Error type for session store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    /// Backend unreachable.
    #[error("session store connection error: {0}")]
    Connection(String),

    /// Backend rejected the command.
    #[error("session store backend error: {0}")]
    Backend(String),

    /// Payload could not be encoded or decoded.
    #[error("session payload serialization error: {0}")]
    Serialization(String),
}

impl SessionStoreError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionStoreError>;

/// Key-value store with per-entry expiry.
#[async_trait]
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Stores a value, replacing any previous one, for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the backend fails.
    async fn put(&self, key: &str, value: String, ttl: Duration) -> SessionResult<()>;

    /// Returns the value if present and not expired.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the backend fails.
    async fn get(&self, key: &str) -> SessionResult<Option<String>>;
}
