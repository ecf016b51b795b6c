//! GROSS codes. String identifiers; trams and trolleybuses are not insured.

use crate::domain::value_objects::{DriverRestriction, PeriodCode, UsageTerritory, VehicleClass};

/// GROSS vehicle category.
#[must_use]
pub const fn vehicle_category(class: VehicleClass) -> Option<&'static str> {
    match class {
        VehicleClass::PassengerCar => Some("M1"),
        VehicleClass::Truck => Some("N"),
        VehicleClass::Bus => Some("M2"),
        VehicleClass::Motorcycle => Some("L"),
        VehicleClass::TramTrolleybus => None,
    }
}

/// GROSS region code.
#[must_use]
pub const fn region_code(territory: UsageTerritory) -> Option<&'static str> {
    match territory {
        UsageTerritory::TashkentCity | UsageTerritory::TashkentRegion => Some("TAS"),
        UsageTerritory::OtherRegions => Some("REG"),
    }
}

/// GROSS term, ISO-8601 style.
#[must_use]
pub const fn term(period: PeriodCode) -> Option<&'static str> {
    match period {
        PeriodCode::OneYear => Some("P12M"),
        PeriodCode::SixMonths => Some("P6M"),
        PeriodCode::TwoMonths | PeriodCode::TwentyDays => None,
    }
}

/// GROSS driver mode.
#[must_use]
pub const fn driver_mode(restriction: DriverRestriction) -> Option<&'static str> {
    match restriction {
        DriverRestriction::Unrestricted => Some("UNLIMITED"),
        DriverRestriction::Limited => Some("LIMITED"),
    }
}
