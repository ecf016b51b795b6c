//! # Normalized Premium
//!
//! A single comparable premium per provider, or the sentinel
//! `"does not exist"` when no premium could be extracted.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Sentinel emitted in place of a premium that could not be extracted.
pub const DOES_NOT_EXIST: &str = "does not exist";

/// Premium in whole currency units (UZS), or the absent sentinel.
///
/// Serializes as a bare JSON integer or as the string `"does not exist"`.
///
/// # Examples
///
/// ```
/// use osago_quotes::domain::value_objects::NormalizedPremium;
///
/// let amount = NormalizedPremium::Amount(192_000);
/// assert_eq!(serde_json::to_string(&amount).unwrap(), "192000");
///
/// let absent = NormalizedPremium::DoesNotExist;
/// assert_eq!(serde_json::to_string(&absent).unwrap(), "\"does not exist\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NormalizedPremium {
    /// Extracted premium.
    Amount(u64),
    /// No premium could be extracted.
    #[default]
    DoesNotExist,
}

impl NormalizedPremium {
    /// Returns the amount, if present.
    #[inline]
    #[must_use]
    pub const fn amount(self) -> Option<u64> {
        match self {
            Self::Amount(value) => Some(value),
            Self::DoesNotExist => None,
        }
    }

    /// Returns true if a premium was extracted.
    #[inline]
    #[must_use]
    pub const fn exists(self) -> bool {
        matches!(self, Self::Amount(_))
    }
}

impl From<Option<u64>> for NormalizedPremium {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::DoesNotExist, Self::Amount)
    }
}

impl fmt::Display for NormalizedPremium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(value) => write!(f, "{}", value),
            Self::DoesNotExist => f.write_str(DOES_NOT_EXIST),
        }
    }
}

impl Serialize for NormalizedPremium {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Amount(value) => serializer.serialize_u64(*value),
            Self::DoesNotExist => serializer.serialize_str(DOES_NOT_EXIST),
        }
    }
}

impl<'de> Deserialize<'de> for NormalizedPremium {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PremiumVisitor;

        impl Visitor<'_> for PremiumVisitor {
            type Value = NormalizedPremium;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a non-negative integer or \"{}\"", DOES_NOT_EXIST)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(NormalizedPremium::Amount(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(NormalizedPremium::Amount)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v == DOES_NOT_EXIST {
                    Ok(NormalizedPremium::DoesNotExist)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(PremiumVisitor)
    }
}
