//! # Redis Session Store
//!
//! [`SessionStore`] over Redis `SET EX` / `GET`, sharing one multiplexed
//! [`ConnectionManager`] that reconnects on its own.

use crate::infrastructure::session::traits::{SessionResult, SessionStore, SessionStoreError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use std::fmt;
use std::time::Duration;

/// Redis-backed session store.
#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
}

impl fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionStore").finish_non_exhaustive()
    }
}

impl RedisSessionStore {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Connection` if the URL is invalid or the
    /// server cannot be reached.
    pub async fn connect(url: &str) -> SessionResult<Self> {
        let client = redis::Client::open(url).map_err(connection_error)?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(connection_error)?;
        Ok(Self { connection })
    }
}

fn connection_error(e: RedisError) -> SessionStoreError {
    SessionStoreError::connection(e.to_string())
}

fn command_error(e: RedisError) -> SessionStoreError {
    if e.is_io_error() {
        SessionStoreError::connection(e.to_string())
    } else {
        SessionStoreError::backend(e.to_string())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> SessionResult<()> {
        // SET EX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        let mut connection = self.connection.clone();
        let _: () = connection
            .set_ex(key, value, seconds)
            .await
            .map_err(command_error)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let mut connection = self.connection.clone();
        connection.get(key).await.map_err(command_error)
    }
}
