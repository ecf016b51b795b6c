//! # Domain Entities
//!
//! - [`ResolvedIdentity`]: session payload produced by identity resolution
//! - [`CalcContext`]: per-call view of the identity shared by request builders

pub mod calc_context;
pub mod identity;

pub use calc_context::{CalcContext, CalcParams, PartyIdentity};
pub use identity::{OwnerRecord, PersonRecord, ResolvedIdentity, VehicleRecord};
