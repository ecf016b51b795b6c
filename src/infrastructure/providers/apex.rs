//! # APEX
//!
//! API-key authenticated tariff endpoint. Answers
//! `{"payload": {"calculation": {"total_premium": "192000.00"}}}`.

use crate::domain::entities::{CalcContext, CalcParams};
use crate::domain::errors::MappingUnsupported;
use crate::domain::mapping::apex;
use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::amount::whole_units;
use crate::infrastructure::providers::traits::ProviderRequest;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

/// Tariff endpoint.
pub const CALC_PATH: &str = "/osago/tariff";

const PROVIDER: ProviderName = ProviderName::Apex;

/// Builds the APEX tariff request.
///
/// # Errors
///
/// Returns `MappingUnsupported` for motorcycles, short periods and missing
/// normalized inputs.
pub fn build_request(
    ctx: &CalcContext,
    params: &CalcParams,
) -> Result<ProviderRequest, MappingUnsupported> {
    let class = ctx
        .vehicle_class
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "vehicle_class"))?;
    let vehicle_type_id = apex::vehicle_type_id(class)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "vehicle_class", class))?;
    let territory = ctx
        .territory
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "use_territory_id"))?;
    let zone_id = apex::zone_id(territory)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "use_territory_id", territory))?;
    let term_months = apex::term_months(params.period)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "period_code", params.period.code()))?;
    let limited_drivers = apex::limited_drivers(params.driver_restriction).ok_or_else(|| {
        MappingUnsupported::new(PROVIDER, "driver_restriction", params.driver_restriction)
    })?;

    let insurant = ctx.applicant();
    Ok(ProviderRequest::post(
        CALC_PATH,
        json!({
            "vehicle_type_id": vehicle_type_id,
            "zone_id": zone_id,
            "term_months": term_months,
            "limited_drivers": limited_drivers,
            "plate_number": ctx.gov_number,
            "tech_passport": {
                "series": ctx.tech_passport_series,
                "number": ctx.tech_passport_number,
            },
            "insurant": {
                "pinfl": insurant.pinfl,
                "passport_series": insurant.passport_series,
                "passport_number": insurant.passport_number,
                "birth_date": insurant.birth_date,
                "is_owner": ctx.is_owner,
            },
        }),
    ))
}

/// APEX tariff response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApexResponse {
    /// Response payload.
    pub payload: ApexPayload,
}

/// APEX response payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApexPayload {
    /// Tariff calculation.
    pub calculation: ApexCalculation,
}

/// APEX tariff calculation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApexCalculation {
    /// Total premium, a decimal string.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_premium: Decimal,
}

impl ApexResponse {
    /// Premium in whole UZS.
    #[must_use]
    pub fn premium(&self) -> Option<u64> {
        whole_units(self.payload.calculation.total_premium)
    }
}
