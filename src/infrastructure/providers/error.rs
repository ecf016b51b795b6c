//! # Provider Errors
//!
//! Error types for partner API calls.
//!
//! Every variant is a "partner unavailable" condition: it is captured in the
//! failing provider's result slot and never escalated past it.
//!
//! # Examples
//!
//! ```
//! use osago_quotes::infrastructure::providers::error::ProviderError;
//!
//! let error = ProviderError::timeout_with_duration("calc timed out", 30_000);
//! assert_eq!(error.kind(), "timeout");
//!
//! let error = ProviderError::status(503, "maintenance");
//! assert_eq!(error.status_code(), Some(503));
//! ```

use thiserror::Error;

/// Error type for provider client operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Request timed out.
    #[error("provider timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("provider connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Authentication or authorization failure.
    #[error("provider authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The request could not be built or sent as given.
    #[error("provider invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Response did not have the expected format.
    #[error("provider protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Internal client error.
    #[error("provider internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },

    /// The task running the call panicked.
    #[error("provider task panicked: {message}")]
    Panicked {
        /// Panic description.
        message: String,
    },
}

/// Longest response body kept in a [`ProviderError::Status`].
const MAX_BODY_CHARS: usize = 512;

impl ProviderError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a status error, truncating long bodies.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.chars().count() > MAX_BODY_CHARS {
            body = body.chars().take(MAX_BODY_CHARS).collect();
            body.push('…');
        }
        Self::Status { status, body }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates a panicked error.
    #[must_use]
    pub fn panicked(message: impl Into<String>) -> Self {
        Self::Panicked {
            message: message.into(),
        }
    }

    /// Stable snake_case tag used in result slots.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Connection { .. } => "connection",
            Self::Authentication { .. } => "authentication",
            Self::Status { .. } => "http_status",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Protocol { .. } => "protocol",
            Self::Internal { .. } => "internal",
            Self::Panicked { .. } => "panicked",
        }
    }

    /// Returns the HTTP status, for status errors.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure is transient on the provider side.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(ProviderError::timeout("t").kind(), "timeout");
        assert_eq!(ProviderError::connection("c").kind(), "connection");
        assert_eq!(ProviderError::authentication("a").kind(), "authentication");
        assert_eq!(ProviderError::status(500, "").kind(), "http_status");
        assert_eq!(ProviderError::protocol("p").kind(), "protocol");
        assert_eq!(ProviderError::panicked("boom").kind(), "panicked");
    }

    #[test]
    fn server_errors_are_transient() {
        assert!(ProviderError::status(502, "").is_transient());
        assert!(ProviderError::status(429, "").is_transient());
        assert!(!ProviderError::status(400, "").is_transient());
        assert!(!ProviderError::authentication("bad key").is_transient());
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(2_000);
        let ProviderError::Status { body, .. } = ProviderError::status(500, body) else {
            unreachable!();
        };
        assert_eq!(body.chars().count(), MAX_BODY_CHARS + 1);
    }

    #[test]
    fn display_format() {
        let error = ProviderError::status(404, "no such tariff");
        assert_eq!(error.to_string(), "provider returned HTTP 404: no such tariff");
    }
}
