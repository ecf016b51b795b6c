//! # Result Normalizer
//!
//! Turns per-provider slots into one comparable premium each.
//!
//! Only a [`ProviderSlot::Response`] whose body matches the provider's
//! typed shape yields an amount; everything else, including a skipped or
//! failed provider and a provider absent from the input, becomes
//! [`NormalizedPremium::DoesNotExist`]. Providers are normalized
//! independently, so output never depends on input order.

use crate::application::dto::ProviderSlot;
use crate::domain::value_objects::{NormalizedPremium, ProviderName};
use crate::infrastructure::providers::response::ProviderResponse;
use std::collections::BTreeMap;

/// Normalizes one provider slot.
#[must_use]
pub fn normalize(provider: ProviderName, slot: &ProviderSlot) -> NormalizedPremium {
    match slot {
        ProviderSlot::Response { response } => ProviderResponse::parse(provider, response)
            .and_then(|typed| typed.premium())
            .into(),
        ProviderSlot::NotAvailable { .. } | ProviderSlot::Error { .. } => {
            NormalizedPremium::DoesNotExist
        }
    }
}

/// Normalizes every provider. The result always has all five keys.
#[must_use]
pub fn normalize_all(
    slots: &BTreeMap<ProviderName, ProviderSlot>,
) -> BTreeMap<ProviderName, NormalizedPremium> {
    ProviderName::ALL
        .into_iter()
        .map(|provider| {
            let premium = slots
                .get(&provider)
                .map_or(NormalizedPremium::DoesNotExist, |slot| {
                    normalize(provider, slot)
                });
            (provider, premium)
        })
        .collect()
}
