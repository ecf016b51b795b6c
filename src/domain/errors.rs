//! # Domain Errors
//!
//! Business rule violations raised by pure domain code.

use crate::domain::value_objects::ProviderName;
use thiserror::Error;

/// A normalized value has no equivalent in a provider's mapping table.
///
/// Treated like ineligibility: the provider is skipped, not failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider} has no mapping for {field} = {value}")]
pub struct MappingUnsupported {
    /// Provider whose table lacks the value.
    pub provider: ProviderName,
    /// Normalized field name.
    pub field: &'static str,
    /// Rendered normalized value, or `"missing"`.
    pub value: String,
}

impl MappingUnsupported {
    /// Creates a mapping error for a value the table does not cover.
    #[must_use]
    pub fn new(provider: ProviderName, field: &'static str, value: impl ToString) -> Self {
        Self {
            provider,
            field,
            value: value.to_string(),
        }
    }

    /// Creates a mapping error for a normalized value that is absent.
    #[must_use]
    pub fn missing(provider: ProviderName, field: &'static str) -> Self {
        Self::new(provider, field, "missing")
    }
}

/// Domain error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The cached identity lacks fields every provider needs.
    #[error("incomplete vehicle data: missing {}", .missing.join(", "))]
    IncompleteVehicleData {
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },

    /// A provider table has no mapping for a normalized value.
    #[error(transparent)]
    MappingUnsupported(#[from] MappingUnsupported),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_unsupported_display() {
        let err = MappingUnsupported::new(ProviderName::Apex, "vehicle_class", "MOTORCYCLE");
        assert_eq!(
            err.to_string(),
            "apex has no mapping for vehicle_class = MOTORCYCLE"
        );
    }

    #[test]
    fn incomplete_vehicle_lists_fields() {
        let err = DomainError::IncompleteVehicleData {
            missing: vec!["gov_number", "tech_passport_number"],
        };
        assert!(err.to_string().contains("gov_number, tech_passport_number"));
    }
}
