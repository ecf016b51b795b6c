//! # EUROASIA
//!
//! Issued-token API. The premium arrives as
//! `{"result": {"insurance_premium": 192000}}`; older deployments send the
//! number as a string, which the decimal deserializer accepts as well.

use crate::domain::entities::{CalcContext, CalcParams};
use crate::domain::errors::MappingUnsupported;
use crate::domain::mapping::euroasia;
use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::amount::whole_units;
use crate::infrastructure::providers::traits::ProviderRequest;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

/// Calculation endpoint.
pub const CALC_PATH: &str = "/api/v2/osago/calc";

const PROVIDER: ProviderName = ProviderName::Euroasia;

/// Builds the EUROASIA calculation request.
///
/// # Errors
///
/// Returns `MappingUnsupported` for the seasonal period and for inputs the
/// registry left empty.
pub fn build_request(
    ctx: &CalcContext,
    params: &CalcParams,
) -> Result<ProviderRequest, MappingUnsupported> {
    let class = ctx
        .vehicle_class
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "vehicle_class"))?;
    let kind_id = euroasia::vehicle_kind_id(class)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "vehicle_class", class))?;
    let territory = ctx
        .territory
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "use_territory_id"))?;
    let region_id = euroasia::region_id(territory)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "use_territory_id", territory))?;
    let period_id = euroasia::period_id(params.period)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "period_code", params.period.code()))?;
    let driver_limit_id = euroasia::driver_limit_id(params.driver_restriction).ok_or_else(|| {
        MappingUnsupported::new(PROVIDER, "driver_restriction", params.driver_restriction)
    })?;

    let applicant = ctx.applicant();
    Ok(ProviderRequest::post(
        CALC_PATH,
        json!({
            "car": {
                "number": ctx.gov_number,
                "techpassport_seria": ctx.tech_passport_series,
                "techpassport_number": ctx.tech_passport_number,
                "kind_id": kind_id,
            },
            "region_id": region_id,
            "period_id": period_id,
            "driver_limit_id": driver_limit_id,
            "owner": {
                "pinfl": ctx.owner.pinfl,
                "inn": ctx.owner.inn,
            },
            "applicant": {
                "pinfl": applicant.pinfl,
                "passport_seria": applicant.passport_series,
                "passport_number": applicant.passport_number,
            },
        }),
    ))
}

/// EUROASIA calculation response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EuroasiaResponse {
    /// Calculation result.
    pub result: EuroasiaResult,
}

/// EUROASIA calculation result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EuroasiaResult {
    /// Premium in UZS.
    pub insurance_premium: Decimal,
}

impl EuroasiaResponse {
    /// Premium in whole UZS.
    #[must_use]
    pub fn premium(&self) -> Option<u64> {
        whole_units(self.result.insurance_premium)
    }
}
