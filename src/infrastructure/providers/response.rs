//! # Provider Responses
//!
//! Tagged union over the five partner response shapes.
//!
//! Each partner nests its premium differently and encodes it differently
//! (number, decimal string or display string). Parsing picks the variant by
//! provider and lets serde reject anything that does not fit; extraction is
//! an exhaustive match.

use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::apex::ApexResponse;
use crate::infrastructure::providers::euroasia::EuroasiaResponse;
use crate::infrastructure::providers::gross::GrossResponse;
use crate::infrastructure::providers::neo::NeoResponse;
use crate::infrastructure::providers::trust::TrustResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A typed partner response.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    /// NEO response.
    Neo(NeoResponse),
    /// GROSS response.
    Gross(GrossResponse),
    /// EUROASIA response.
    Euroasia(EuroasiaResponse),
    /// APEX response.
    Apex(ApexResponse),
    /// TRUST response.
    Trust(TrustResponse),
}

impl ProviderResponse {
    /// Parses a raw response body for the given provider.
    ///
    /// Returns `None` when the body does not have the provider's shape.
    #[must_use]
    pub fn parse(provider: ProviderName, body: &Value) -> Option<Self> {
        match provider {
            ProviderName::Neo => typed(body).map(Self::Neo),
            ProviderName::Gross => typed(body).map(Self::Gross),
            ProviderName::Euroasia => typed(body).map(Self::Euroasia),
            ProviderName::Apex => typed(body).map(Self::Apex),
            ProviderName::Trust => typed(body).map(Self::Trust),
        }
    }

    /// Returns the provider this response came from.
    #[must_use]
    pub const fn provider(&self) -> ProviderName {
        match self {
            Self::Neo(_) => ProviderName::Neo,
            Self::Gross(_) => ProviderName::Gross,
            Self::Euroasia(_) => ProviderName::Euroasia,
            Self::Apex(_) => ProviderName::Apex,
            Self::Trust(_) => ProviderName::Trust,
        }
    }

    /// Premium in whole currency units, if the response carries a usable one.
    #[must_use]
    pub fn premium(&self) -> Option<u64> {
        match self {
            Self::Neo(r) => r.premium(),
            Self::Gross(r) => r.premium(),
            Self::Euroasia(r) => r.premium(),
            Self::Apex(r) => r.premium(),
            Self::Trust(r) => r.premium(),
        }
    }
}

fn typed<T: DeserializeOwned>(body: &Value) -> Option<T> {
    T::deserialize(body).ok()
}
