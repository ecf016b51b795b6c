//! # NEO
//!
//! Request builder and response shape for the NEO calculation API.
//!
//! NEO authenticates with HTTP Basic and answers
//! `{"result": 0, "response": {"amount_uzs": 192000, ...}}`.

use crate::domain::entities::{CalcContext, CalcParams};
use crate::domain::errors::MappingUnsupported;
use crate::domain::mapping::neo;
use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::amount::whole_units;
use crate::infrastructure::providers::traits::ProviderRequest;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

/// Calculation endpoint.
pub const CALC_PATH: &str = "/api/osago/calculate";

const PROVIDER: ProviderName = ProviderName::Neo;

/// Builds the NEO calculation request.
///
/// # Errors
///
/// Returns `MappingUnsupported` when the vehicle class, territory, period or
/// driver restriction has no NEO code.
pub fn build_request(
    ctx: &CalcContext,
    params: &CalcParams,
) -> Result<ProviderRequest, MappingUnsupported> {
    let class = ctx
        .vehicle_class
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "vehicle_class"))?;
    let vehicle_type_id = neo::vehicle_type_id(class)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "vehicle_class", class))?;
    let territory = ctx
        .territory
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "use_territory_id"))?;
    let territory_id = neo::territory_id(territory)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "use_territory_id", territory))?;
    let period_id = neo::period_id(params.period)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "period_code", params.period.code()))?;
    let driver_limit_id = neo::driver_limit_id(params.driver_restriction).ok_or_else(|| {
        MappingUnsupported::new(PROVIDER, "driver_restriction", params.driver_restriction)
    })?;

    let driver = ctx.driver.as_ref();
    Ok(ProviderRequest::post(
        CALC_PATH,
        json!({
            "gov_number": ctx.gov_number,
            "tech_passport_series": ctx.tech_passport_series,
            "tech_passport_number": ctx.tech_passport_number,
            "vehicle_type_id": vehicle_type_id,
            "territory_id": territory_id,
            "period_id": period_id,
            "driver_limit_id": driver_limit_id,
            "owner_pinfl": ctx.owner.pinfl,
            "owner_inn": ctx.owner.inn,
            "driver_pinfl": driver.and_then(|d| d.pinfl.clone()),
            "applicant_is_owner": ctx.is_owner,
        }),
    ))
}

/// NEO calculation response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeoResponse {
    /// Calculation payload.
    pub response: NeoCalculation,
}

/// NEO calculation payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NeoCalculation {
    /// Premium in UZS.
    pub amount_uzs: Decimal,
}

impl NeoResponse {
    /// Premium in whole UZS.
    #[must_use]
    pub fn premium(&self) -> Option<u64> {
        whole_units(self.response.amount_uzs)
    }
}
