//! # Domain Layer
//!
//! Pure quote-domain types with no I/O.
//!
//! - [`value_objects`]: provider names, period and driver codes, premiums
//! - [`entities`]: resolved identity and calculation context
//! - [`mapping`]: static provider code tables and eligibility rules
//! - [`errors`]: domain errors

pub mod entities;
pub mod errors;
pub mod mapping;
pub mod value_objects;

pub use errors::{DomainError, DomainResult, MappingUnsupported};
