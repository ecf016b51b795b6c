//! # Application Services
//!
//! Building blocks of the Calc use case:
//! - [`dispatch_all`]: concurrent fan-out with per-task timeout and panic
//!   isolation
//! - [`normalize_all`]: premium extraction into one comparable value per
//!   provider

pub mod fan_out;
pub mod normalizer;

pub use fan_out::{DispatchFailure, DispatchOutcome, FanOutTask, dispatch_all};
pub use normalizer::{normalize, normalize_all};
