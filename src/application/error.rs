//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Request-shape errors fail a call before any I/O. Partner failures never
//! appear here: they are contained in the partner's result slot. The only
//! partner-related variant is [`ApplicationError::LookupFailed`], raised
//! when Find could not resolve anything at all.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── InvalidRequest(String)              - 400
//! ├── InvalidPeriod(i64)                  - 400
//! ├── InvalidDriverRestriction(i64)       - 400
//! ├── SessionNotFound(String)             - 404
//! ├── IncompleteVehicleData { missing }   - 422
//! ├── LookupFailed { errors }             - 502
//! ├── Infrastructure(InfrastructureError) - 500
//! └── Internal(String)                    - 500
//! ```
//!
//! # Examples
//!
//! ```
//! use osago_quotes::application::error::{ApplicationError, InfrastructureError};
//!
//! let err = ApplicationError::InvalidPeriod(7);
//! assert!(err.is_validation());
//! assert_eq!(err.http_status(), 400);
//!
//! let app_err: ApplicationError = InfrastructureError::serialization("bad json").into();
//! assert_eq!(app_err.http_status(), 500);
//! ```

use crate::application::dto::LookupFailure;
use crate::domain::errors::DomainError;
use crate::infrastructure::session::SessionStoreError;
use thiserror::Error;

/// Infrastructure layer error.
///
/// Failures of the components the use cases depend on, other than partner
/// calls.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Session store error.
    #[error("session store error: {0}")]
    Session(#[from] SessionStoreError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl InfrastructureError {
    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The request is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown period code.
    #[error("invalid period code: {0}")]
    InvalidPeriod(i64),

    /// Unknown driver restriction.
    #[error("invalid driver restriction: {0}")]
    InvalidDriverRestriction(i64),

    /// Session absent or expired.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The cached identity cannot be quoted.
    #[error("incomplete vehicle data: missing {}", .missing.join(", "))]
    IncompleteVehicleData {
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },

    /// No lookup side resolved.
    #[error("identity lookup failed: {}", summarize(.errors))]
    LookupFailed {
        /// Per-side failures.
        errors: Vec<LookupFailure>,
    },

    /// Infrastructure error.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

fn summarize(errors: &[LookupFailure]) -> String {
    if errors.is_empty() {
        return "nothing to look up".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{}: {}", e.side, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::IncompleteVehicleData { missing } => {
                Self::IncompleteVehicleData { missing }
            }
            // Builders report this per provider; reaching here is a bug.
            DomainError::MappingUnsupported(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<SessionStoreError> for ApplicationError {
    fn from(error: SessionStoreError) -> Self {
        Self::Infrastructure(error.into())
    }
}

impl ApplicationError {
    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates a session not found error.
    #[must_use]
    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::SessionNotFound(session_id.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the request itself was rejected.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::InvalidPeriod(_) | Self::InvalidDriverRestriction(_)
        )
    }

    /// Returns true if the session does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound(_))
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidPeriod(_) => "invalid_period",
            Self::InvalidDriverRestriction(_) => "invalid_driver_restriction",
            Self::SessionNotFound(_) => "session_not_found",
            Self::IncompleteVehicleData { .. } => "incomplete_vehicle_data",
            Self::LookupFailed { .. } => "lookup_failed",
            Self::Infrastructure(_) => "infrastructure",
            Self::Internal(_) => "internal",
        }
    }

    /// HTTP status code for the error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidRequest(_)
            | Self::InvalidPeriod(_)
            | Self::InvalidDriverRestriction(_) => 400,
            Self::SessionNotFound(_) => 404,
            Self::IncompleteVehicleData { .. } => 422,
            Self::LookupFailed { .. } => 502,
            Self::Infrastructure(_) | Self::Internal(_) => 500,
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
