//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`SessionId`]: UUID-based identifier of a resolved-identity session
//!
//! ## Domain Enums
//!
//! - [`ProviderName`]: the five partner insurers
//! - [`PeriodCode`], [`DriverRestriction`]: normalized calculation inputs
//! - [`VehicleClass`], [`UsageTerritory`]: normalized registry codes
//!
//! ## Results
//!
//! - [`NormalizedPremium`]: comparable premium or the absent sentinel

pub mod enums;
pub mod ids;
pub mod premium;

pub use enums::{
    DriverRestriction, ParseEnumError, PeriodCode, ProviderName, UsageTerritory, VehicleClass,
};
pub use ids::SessionId;
pub use premium::{DOES_NOT_EXIST, NormalizedPremium};
