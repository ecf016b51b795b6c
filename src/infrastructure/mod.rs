//! # Infrastructure Layer
//!
//! Adapters to the outside world: partner APIs and the session store.

pub mod providers;
pub mod session;
