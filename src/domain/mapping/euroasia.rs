//! EUROASIA codes.

use crate::domain::value_objects::{DriverRestriction, PeriodCode, UsageTerritory, VehicleClass};

/// EUROASIA vehicle kind id.
#[must_use]
pub const fn vehicle_kind_id(class: VehicleClass) -> Option<u16> {
    match class {
        VehicleClass::PassengerCar => Some(10),
        VehicleClass::Truck => Some(20),
        VehicleClass::Bus => Some(30),
        VehicleClass::Motorcycle => Some(40),
        VehicleClass::TramTrolleybus => Some(50),
    }
}

/// EUROASIA region id.
#[must_use]
pub const fn region_id(territory: UsageTerritory) -> Option<u8> {
    match territory {
        UsageTerritory::TashkentCity | UsageTerritory::TashkentRegion => Some(1),
        UsageTerritory::OtherRegions => Some(2),
    }
}

/// EUROASIA period id. Id 3 (three months) is not sold through the API.
#[must_use]
pub const fn period_id(period: PeriodCode) -> Option<u8> {
    match period {
        PeriodCode::OneYear => Some(1),
        PeriodCode::SixMonths => Some(2),
        PeriodCode::TwentyDays => Some(4),
        PeriodCode::TwoMonths => None,
    }
}

/// EUROASIA driver limit id.
#[must_use]
pub const fn driver_limit_id(restriction: DriverRestriction) -> Option<u8> {
    match restriction {
        DriverRestriction::Limited => Some(1),
        DriverRestriction::Unrestricted => Some(2),
    }
}
