//! # In-Memory Session Store
//!
//! [`SessionStore`] over a `DashMap`, for tests and single-instance
//! deployments. Expired entries are dropped lazily on read, and in bulk by
//! [`InMemorySessionStore::purge_expired`], which a long-running process
//! schedules with [`InMemorySessionStore::spawn_sweeper`].

use crate::infrastructure::session::traits::{SessionResult, SessionStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Default period between sweeps of expired sessions.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<DashMap<String, Entry>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries, expired ones included until
    /// they are purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        purge(&self.entries)
    }

    /// Spawns a task purging expired entries every `every`.
    ///
    /// The task ends once every handle to the store has been dropped.
    /// Must be called within a tokio runtime.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let entries: Weak<DashMap<String, Entry>> = Arc::downgrade(&self.entries);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let purged = purge(&entries);
                if purged > 0 {
                    debug!(purged, remaining = entries.len(), "expired sessions purged");
                }
            }
        })
    }
}

fn purge(entries: &DashMap<String, Entry>) -> usize {
    let now = Instant::now();
    let before = entries.len();
    entries.retain(|_, entry| entry.is_live(now));
    before.saturating_sub(entries.len())
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, key: &str, value: String, ttl: Duration) -> SessionResult<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }

    async fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let now = Instant::now();
        let value = self
            .entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone());
        if value.is_none() {
            self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        }
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(1800);

    #[tokio::test]
    async fn put_then_get() {
        let store = InMemorySessionStore::new();
        store.put("osago:session:a", "{}".to_string(), TTL).await.unwrap();
        assert_eq!(store.get("osago:session:a").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(store.get("osago:session:b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_value() {
        let store = InMemorySessionStore::new();
        store.put("k", "old".to_string(), TTL).await.unwrap();
        store.put("k", "new".to_string(), TTL).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let store = InMemorySessionStore::new();
        store.put("k", "v".to_string(), TTL).await.unwrap();

        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        assert!(store.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn purge_drops_only_expired() {
        let store = InMemorySessionStore::new();
        store.put("short", "v".to_string(), Duration::from_secs(10)).await.unwrap();
        store.put("long", "v".to_string(), TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;
        assert_eq!(store.purge_expired(), 1);
        assert!(store.get("long").await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_bounds_abandoned_sessions() {
        let store = InMemorySessionStore::new();
        let sweeper = store.spawn_sweeper(DEFAULT_SWEEP_INTERVAL);
        for i in 0..1000 {
            store.put(&format!("osago:session:{i}"), "{}".to_string(), TTL).await.unwrap();
        }

        tokio::time::sleep(Duration::from_secs(3600)).await;
        store.put("osago:session:fresh", "{}".to_string(), TTL).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get("osago:session:fresh").await.unwrap().is_some());
        sweeper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_stops_with_the_store() {
        let store = InMemorySessionStore::new();
        let sweeper = store.spawn_sweeper(DEFAULT_SWEEP_INTERVAL);
        drop(store);
        tokio::time::sleep(DEFAULT_SWEEP_INTERVAL * 2).await;
        assert!(sweeper.is_finished());
    }
}
