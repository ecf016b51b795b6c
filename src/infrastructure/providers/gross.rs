//! # GROSS
//!
//! GROSS takes a nested document with ISO-style terms and answers
//! `{"data": {"premium": {"amount": "192000.00", "currency": "UZS"}}}`.

use crate::domain::entities::{CalcContext, CalcParams, PartyIdentity};
use crate::domain::errors::MappingUnsupported;
use crate::domain::mapping::gross;
use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::amount::whole_units;
use crate::infrastructure::providers::traits::ProviderRequest;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

/// Quote endpoint.
pub const CALC_PATH: &str = "/v1/osago/quote";

const PROVIDER: ProviderName = ProviderName::Gross;

/// Builds the GROSS quote request.
///
/// # Errors
///
/// Returns `MappingUnsupported` when any input has no GROSS code, which is
/// always the case for trams and for periods shorter than six months.
pub fn build_request(
    ctx: &CalcContext,
    params: &CalcParams,
) -> Result<ProviderRequest, MappingUnsupported> {
    let class = ctx
        .vehicle_class
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "vehicle_class"))?;
    let category = gross::vehicle_category(class)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "vehicle_class", class))?;
    let territory = ctx
        .territory
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "use_territory_id"))?;
    let region = gross::region_code(territory)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "use_territory_id", territory))?;
    let term = gross::term(params.period)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "period_code", params.period.code()))?;
    let drivers = gross::driver_mode(params.driver_restriction).ok_or_else(|| {
        MappingUnsupported::new(PROVIDER, "driver_restriction", params.driver_restriction)
    })?;

    Ok(ProviderRequest::post(
        CALC_PATH,
        json!({
            "vehicle": {
                "plate": ctx.gov_number,
                "registration_certificate": format!(
                    "{}{}",
                    ctx.tech_passport_series, ctx.tech_passport_number
                ),
                "category": category,
            },
            "region": region,
            "term": term,
            "drivers": drivers,
            "policyholder": party(ctx.applicant()),
            "owner_is_policyholder": ctx.is_owner,
        }),
    ))
}

fn party(identity: &PartyIdentity) -> Value {
    let passport = match (&identity.passport_series, &identity.passport_number) {
        (Some(series), Some(number)) => Some(format!("{series}{number}")),
        _ => None,
    };
    json!({
        "pinfl": identity.pinfl,
        "passport": passport,
        "inn": identity.inn,
    })
}

/// GROSS quote response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrossResponse {
    /// Quote payload.
    pub data: GrossQuote,
}

/// GROSS quote payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrossQuote {
    /// Quoted premium.
    pub premium: GrossPremium,
}

/// GROSS premium, a decimal string plus currency.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrossPremium {
    /// Amount.
    pub amount: Decimal,
    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

impl GrossResponse {
    /// Premium in whole UZS.
    #[must_use]
    pub fn premium(&self) -> Option<u64> {
        whole_units(self.data.premium.amount)
    }
}
