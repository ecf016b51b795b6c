//! # TRUST
//!
//! The only partner selling the seasonal two-month cover. TRUST returns the
//! premium as a display string, e.g.
//! `{"insurance_premium": "192 000,00 UZS", "status": "ok"}`.

use crate::domain::entities::{CalcContext, CalcParams};
use crate::domain::errors::MappingUnsupported;
use crate::domain::mapping::trust;
use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::amount::parse_formatted_amount;
use crate::infrastructure::providers::traits::ProviderRequest;
use serde::Deserialize;
use serde_json::json;

/// Calculator endpoint.
pub const CALC_PATH: &str = "/api/calculator/osago";

const PROVIDER: ProviderName = ProviderName::Trust;

/// Builds the TRUST calculator request.
///
/// # Errors
///
/// Returns `MappingUnsupported` only when the vehicle class or territory is
/// missing; every period and restriction has a TRUST code.
pub fn build_request(
    ctx: &CalcContext,
    params: &CalcParams,
) -> Result<ProviderRequest, MappingUnsupported> {
    let class = ctx
        .vehicle_class
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "vehicle_class"))?;
    let vehicle_type_id = trust::vehicle_type_id(class)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "vehicle_class", class))?;
    let territory = ctx
        .territory
        .ok_or_else(|| MappingUnsupported::missing(PROVIDER, "use_territory_id"))?;
    let territory_id = trust::territory_id(territory)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "use_territory_id", territory))?;
    let period = trust::period(params.period)
        .ok_or_else(|| MappingUnsupported::new(PROVIDER, "period_code", params.period.code()))?;
    let driver_limit_id = trust::driver_limit_id(params.driver_restriction).ok_or_else(|| {
        MappingUnsupported::new(PROVIDER, "driver_restriction", params.driver_restriction)
    })?;

    let applicant = ctx.applicant();
    Ok(ProviderRequest::post(
        CALC_PATH,
        json!({
            "vehicle_type_id": vehicle_type_id,
            "territory_id": territory_id,
            "period_id": period.period_id,
            "seasonal_insurance_id": period.seasonal_insurance_id,
            "driver_limit_id": driver_limit_id,
            "gov_number": ctx.gov_number,
            "tech_passport_series": ctx.tech_passport_series,
            "tech_passport_number": ctx.tech_passport_number,
            "owner_pinfl": ctx.owner.pinfl,
            "owner_inn": ctx.owner.inn,
            "applicant_pinfl": applicant.pinfl,
            "applicant_passport_series": applicant.passport_series,
            "applicant_passport_number": applicant.passport_number,
            "is_owner": u8::from(ctx.is_owner),
        }),
    ))
}

/// TRUST calculator response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrustResponse {
    /// Premium as displayed by TRUST, e.g. `"192 000,00 UZS"`.
    pub insurance_premium: String,
}

impl TrustResponse {
    /// Premium in whole UZS.
    #[must_use]
    pub fn premium(&self) -> Option<u64> {
        parse_formatted_amount(&self.insurance_premium)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DriverRestriction, PeriodCode};
    use crate::infrastructure::providers::fixtures::passenger_car;
    use serde_json::Value;

    #[test]
    fn seasonal_request_carries_seasonal_id() {
        let params = CalcParams::new(PeriodCode::TwoMonths, DriverRestriction::Unrestricted);
        let body = build_request(&passenger_car(), &params).unwrap().body.unwrap();
        assert_eq!(body["period_id"], 4);
        assert_eq!(body["seasonal_insurance_id"], 2);
        assert_eq!(body["driver_limit_id"], 1);
        assert_eq!(body["is_owner"], 0);
    }

    #[test]
    fn yearly_request_has_no_seasonal_id() {
        let params = CalcParams::new(PeriodCode::OneYear, DriverRestriction::Limited);
        let body = build_request(&passenger_car(), &params).unwrap().body.unwrap();
        assert_eq!(body["period_id"], 1);
        assert_eq!(body["seasonal_insurance_id"], Value::Null);
        assert_eq!(body["driver_limit_id"], 0);
    }

    #[test]
    fn formatted_premium() {
        let response: TrustResponse = serde_json::from_value(
            json!({"insurance_premium": "192 000,00 UZS", "status": "ok"}),
        )
        .unwrap();
        assert_eq!(response.premium(), Some(192_000));
    }

    #[test]
    fn unparseable_premium_is_absent() {
        let response = TrustResponse {
            insurance_premium: "нет данных".to_string(),
        };
        assert_eq!(response.premium(), None);
    }
}
