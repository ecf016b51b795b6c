//! APEX codes. Vehicle ids mirror the registry type ids; motorcycles are not
//! insured.

use crate::domain::value_objects::{DriverRestriction, PeriodCode, UsageTerritory, VehicleClass};

/// APEX vehicle type id.
#[must_use]
pub const fn vehicle_type_id(class: VehicleClass) -> Option<u8> {
    match class {
        VehicleClass::PassengerCar => Some(2),
        VehicleClass::Truck => Some(6),
        VehicleClass::Bus => Some(9),
        VehicleClass::Motorcycle => None,
        VehicleClass::TramTrolleybus => Some(18),
    }
}

/// APEX zone id.
#[must_use]
pub const fn zone_id(territory: UsageTerritory) -> Option<u8> {
    match territory {
        UsageTerritory::TashkentCity => Some(10),
        UsageTerritory::TashkentRegion => Some(11),
        UsageTerritory::OtherRegions => Some(12),
    }
}

/// APEX term in months.
#[must_use]
pub const fn term_months(period: PeriodCode) -> Option<u8> {
    match period {
        PeriodCode::OneYear => Some(12),
        PeriodCode::SixMonths => Some(6),
        PeriodCode::TwoMonths | PeriodCode::TwentyDays => None,
    }
}

/// APEX `limited_drivers` flag.
#[must_use]
pub const fn limited_drivers(restriction: DriverRestriction) -> Option<bool> {
    match restriction {
        DriverRestriction::Unrestricted => Some(false),
        DriverRestriction::Limited => Some(true),
    }
}
