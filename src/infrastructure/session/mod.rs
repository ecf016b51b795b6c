//! # Session Store
//!
//! Storage for resolved identities between Find and Calc.
//!
//! - [`InMemorySessionStore`]: `DashMap` with lazy expiry
//! - [`RedisSessionStore`]: Redis `SET EX` / `GET`

pub mod in_memory;
pub mod redis;
pub mod traits;

pub use self::in_memory::{DEFAULT_SWEEP_INTERVAL, InMemorySessionStore};
pub use self::redis::RedisSessionStore;
pub use self::traits::{SessionResult, SessionStore, SessionStoreError};
