//! TRUST codes. The only provider selling the seasonal two-month cover,
//! which is expressed as a regular period id plus a seasonal insurance id.

use crate::domain::value_objects::{DriverRestriction, PeriodCode, UsageTerritory, VehicleClass};

/// TRUST period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustPeriod {
    /// Period id.
    pub period_id: u8,
    /// Seasonal insurance id, for seasonal cover only.
    pub seasonal_insurance_id: Option<u8>,
}

/// TRUST vehicle type id.
#[must_use]
pub const fn vehicle_type_id(class: VehicleClass) -> Option<u8> {
    match class {
        VehicleClass::PassengerCar => Some(1),
        VehicleClass::Truck => Some(2),
        VehicleClass::Bus => Some(3),
        VehicleClass::Motorcycle => Some(4),
        VehicleClass::TramTrolleybus => Some(5),
    }
}

/// TRUST territory id.
#[must_use]
pub const fn territory_id(territory: UsageTerritory) -> Option<u8> {
    match territory {
        UsageTerritory::TashkentCity => Some(1),
        UsageTerritory::TashkentRegion => Some(2),
        UsageTerritory::OtherRegions => Some(3),
    }
}

/// TRUST period.
#[must_use]
pub const fn period(period: PeriodCode) -> Option<TrustPeriod> {
    let (period_id, seasonal_insurance_id) = match period {
        PeriodCode::OneYear => (1, None),
        PeriodCode::SixMonths => (2, None),
        PeriodCode::TwentyDays => (3, None),
        PeriodCode::TwoMonths => (4, Some(2)),
    };
    Some(TrustPeriod {
        period_id,
        seasonal_insurance_id,
    })
}

/// TRUST driver limit id.
#[must_use]
pub const fn driver_limit_id(restriction: DriverRestriction) -> Option<u8> {
    match restriction {
        DriverRestriction::Unrestricted => Some(1),
        DriverRestriction::Limited => Some(0),
    }
}
