//! # Application Layer
//!
//! Use cases orchestrating the domain and the infrastructure ports.
//!
//! - [`use_cases`]: Find and Calc
//! - [`services`]: fan-out and premium normalization
//! - [`dto`]: request and response types of both operations
//! - [`error`]: application errors and their HTTP status mapping

pub mod dto;
pub mod error;
pub mod services;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult, InfrastructureError};
pub use use_cases::{IdentityResolver, QuoteOrchestrator};
