//! NEO codes. All numeric.

use crate::domain::value_objects::{DriverRestriction, PeriodCode, UsageTerritory, VehicleClass};

/// NEO vehicle type id.
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

/// NEO territory id. Tashkent city and region share one tariff zone.
#[must_use]
pub const fn territory_id(territory: UsageTerritory) -> Option<u8> {
    match territory {
        UsageTerritory::TashkentCity | UsageTerritory::TashkentRegion => Some(1),
        UsageTerritory::OtherRegions => Some(2),
    }
}

/// NEO period id.
#[must_use]
pub const fn period_id(period: PeriodCode) -> Option<u8> {
    match period {
        PeriodCode::OneYear => Some(1),
        PeriodCode::SixMonths => Some(2),
        PeriodCode::TwentyDays => Some(3),
        PeriodCode::TwoMonths => None,
    }
}

/// NEO driver limit id.
#[must_use]
pub const fn driver_limit_id(restriction: DriverRestriction) -> Option<u8> {
    match restriction {
        DriverRestriction::Unrestricted => Some(0),
        DriverRestriction::Limited => Some(1),
    }
}
