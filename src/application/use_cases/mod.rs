//! # Use Cases
//!
//! The two public operations of the engine.
//!
//! - [`IdentityResolver::find`]: resolve vehicle and person, open a session
//! - [`QuoteOrchestrator::calculate`]: quote every eligible partner for a
//!   session

pub mod calculate_quotes;
pub mod find_identity;

pub use calculate_quotes::{ProviderClients, QuoteOrchestrator};
pub use find_identity::IdentityResolver;
