//! # OSAGO Quotes
//!
//! Quote aggregation engine for compulsory motor insurance (OSAGO) across
//! five partner insurers: NEO, GROSS, EUROASIA, APEX and TRUST.
//!
//! The engine runs a two-phase workflow:
//!
//! 1. **Find**: look up a vehicle and a person in a partner registry
//!    concurrently and cache the resolved identity as a session
//! 2. **Calc**: translate one normalized calculation into each partner's
//!    schema, call every eligible partner concurrently, and normalize the
//!    answers into one comparable premium per partner
//!
//! A failing partner only ever affects its own result slot.
//!
//! # Architecture
//!
//! - [`domain`]: provider names, codes, mapping tables, identity types
//! - [`application`]: the Find and Calc use cases, fan-out, normalization
//! - [`infrastructure`]: partner HTTP clients, registry, session stores
//! - [`api`]: axum REST surface
//! - [`config`], [`telemetry`]: layered configuration and tracing setup
//!
//! # Example
//!
//! ```ignore
//! use osago_quotes::application::dto::{CalcRequest, FindRequest};
//!
//! let found = resolver
//!     .find(FindRequest::vehicle("01A123BC", "AAB", "1234567"))
//!     .await?;
//! let quotes = orchestrator
//!     .calculate(CalcRequest::new(found.session_id.to_string(), 12, 0))
//!     .await?;
//! println!("{:?}", quotes.result);
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
