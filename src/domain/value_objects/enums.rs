//! # Domain Enums
//!
//! Enumeration types for the normalized quote domain.
//!
//! - [`ProviderName`] - The five partner insurers
//! - [`PeriodCode`] - Coverage period codes accepted by Calc
//! - [`DriverRestriction`] - Unrestricted or limited driver list
//! - [`VehicleClass`] - Normalized vehicle class derived from registry codes
//! - [`UsageTerritory`] - Registered usage territory of a vehicle
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display` and Serde traits. Numeric domain codes convert with `TryFrom<i64>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five partner insurers whose quotes are aggregated.
///
/// Ordering follows declaration order, which is also the order of
/// [`ProviderName::ALL`] and of every provider-keyed map in responses.
///
/// # Examples
///
/// ```
/// use osago_quotes::domain::value_objects::enums::ProviderName;
///
/// assert_eq!(ProviderName::Trust.to_string(), "trust");
/// assert_eq!("EUROASIA".parse::<ProviderName>().unwrap(), ProviderName::Euroasia);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    /// NEO Insurance.
    Neo,
    /// GROSS Insurance.
    Gross,
    /// EUROASIA Insurance.
    Euroasia,
    /// APEX Insurance.
    Apex,
    /// TRUST Insurance.
    Trust,
}

impl ProviderName {
    /// All known providers.
    pub const ALL: [ProviderName; 5] = [
        Self::Neo,
        Self::Gross,
        Self::Euroasia,
        Self::Apex,
        Self::Trust,
    ];

    /// Returns the lowercase wire name of the provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neo => "neo",
            Self::Gross => "gross",
            Self::Euroasia => "euroasia",
            Self::Apex => "apex",
            Self::Trust => "trust",
        }
    }

    /// Static eligibility rule: whether the provider sells policies for the
    /// given coverage period at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use osago_quotes::domain::value_objects::enums::{PeriodCode, ProviderName};
    ///
    /// assert!(ProviderName::Trust.supports_period(PeriodCode::TwoMonths));
    /// assert!(!ProviderName::Neo.supports_period(PeriodCode::TwoMonths));
    /// ```
    #[must_use]
    pub const fn supports_period(self, period: PeriodCode) -> bool {
        match self {
            Self::Neo | Self::Euroasia => matches!(
                period,
                PeriodCode::OneYear | PeriodCode::SixMonths | PeriodCode::TwentyDays
            ),
            Self::Gross | Self::Apex => {
                matches!(period, PeriodCode::OneYear | PeriodCode::SixMonths)
            }
            Self::Trust => true,
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderName {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neo" => Ok(Self::Neo),
            "gross" => Ok(Self::Gross),
            "euroasia" => Ok(Self::Euroasia),
            "apex" => Ok(Self::Apex),
            "trust" => Ok(Self::Trust),
            _ => Err(ParseEnumError::InvalidValue("ProviderName", s.to_string())),
        }
    }
}

/// Coverage period code.
///
/// The code is a domain value, not a duration: `3` is the seasonal
/// two-month cover, `20` is the twenty-day transit cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(u8)]
pub enum PeriodCode {
    /// Seasonal cover, two months.
    TwoMonths = 3,
    /// Six months.
    SixMonths = 6,
    /// One year.
    OneYear = 12,
    /// Twenty days.
    TwentyDays = 20,
}

impl PeriodCode {
    /// All valid period codes.
    pub const ALL: [PeriodCode; 4] = [
        Self::TwoMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::TwentyDays,
    ];

    /// Returns the numeric code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for PeriodCode {
    type Error = ParseEnumError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Self::TwoMonths),
            6 => Ok(Self::SixMonths),
            12 => Ok(Self::OneYear),
            20 => Ok(Self::TwentyDays),
            _ => Err(ParseEnumError::InvalidValue("PeriodCode", value.to_string())),
        }
    }
}

impl From<PeriodCode> for i64 {
    fn from(value: PeriodCode) -> Self {
        value.code()
    }
}

impl fmt::Display for PeriodCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoMonths => write!(f, "2 months"),
            Self::SixMonths => write!(f, "6 months"),
            Self::OneYear => write!(f, "12 months"),
            Self::TwentyDays => write!(f, "20 days"),
        }
    }
}

/// Whether the policy covers any driver or only the listed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(u8)]
pub enum DriverRestriction {
    /// Any driver may operate the vehicle.
    #[default]
    Unrestricted = 0,
    /// Only the drivers named on the policy.
    Limited = 1,
}

impl DriverRestriction {
    /// Both restriction flags.
    pub const ALL: [DriverRestriction; 2] = [Self::Unrestricted, Self::Limited];

    /// Returns true if the driver list is limited.
    #[inline]
    #[must_use]
    pub const fn is_limited(self) -> bool {
        matches!(self, Self::Limited)
    }
}

impl TryFrom<i64> for DriverRestriction {
    type Error = ParseEnumError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unrestricted),
            1 => Ok(Self::Limited),
            _ => Err(ParseEnumError::InvalidValue(
                "DriverRestriction",
                value.to_string(),
            )),
        }
    }
}

impl From<DriverRestriction> for i64 {
    fn from(value: DriverRestriction) -> Self {
        value as i64
    }
}

impl fmt::Display for DriverRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrestricted => write!(f, "UNRESTRICTED"),
            Self::Limited => write!(f, "LIMITED"),
        }
    }
}

/// Normalized vehicle class.
///
/// Derived from the registry vehicle type id, falling back on the vehicle
/// group id when the type id is absent or unknown.
///
/// # Examples
///
/// ```
/// use osago_quotes::domain::value_objects::enums::VehicleClass;
///
/// assert_eq!(VehicleClass::from_registry(Some(2), None), Some(VehicleClass::PassengerCar));
/// assert_eq!(VehicleClass::from_registry(Some(99), Some(3)), Some(VehicleClass::Bus));
/// assert_eq!(VehicleClass::from_registry(None, None), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleClass {
    /// Passenger car.
    PassengerCar,
    /// Truck or other goods vehicle.
    Truck,
    /// Bus or minibus.
    Bus,
    /// Motorcycle or moped.
    Motorcycle,
    /// Tram or trolleybus.
    TramTrolleybus,
}

impl VehicleClass {
    /// All vehicle classes.
    pub const ALL: [VehicleClass; 5] = [
        Self::PassengerCar,
        Self::Truck,
        Self::Bus,
        Self::Motorcycle,
        Self::TramTrolleybus,
    ];

    /// Resolves the class from registry codes.
    #[must_use]
    pub fn from_registry(type_id: Option<i64>, group_id: Option<i64>) -> Option<Self> {
        type_id
            .and_then(Self::from_type_id)
            .or_else(|| group_id.and_then(Self::from_group_id))
    }

    fn from_type_id(type_id: i64) -> Option<Self> {
        match type_id {
            2 => Some(Self::PassengerCar),
            6 => Some(Self::Truck),
            9 => Some(Self::Bus),
            15 => Some(Self::Motorcycle),
            18 => Some(Self::TramTrolleybus),
            _ => None,
        }
    }

    fn from_group_id(group_id: i64) -> Option<Self> {
        match group_id {
            1 => Some(Self::PassengerCar),
            2 => Some(Self::Truck),
            3 => Some(Self::Bus),
            4 => Some(Self::Motorcycle),
            5 => Some(Self::TramTrolleybus),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassengerCar => write!(f, "PASSENGER_CAR"),
            Self::Truck => write!(f, "TRUCK"),
            Self::Bus => write!(f, "BUS"),
            Self::Motorcycle => write!(f, "MOTORCYCLE"),
            Self::TramTrolleybus => write!(f, "TRAM_TROLLEYBUS"),
        }
    }
}

/// Registered usage territory of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(u8)]
pub enum UsageTerritory {
    /// Tashkent city.
    TashkentCity = 1,
    /// Tashkent region.
    TashkentRegion = 2,
    /// Any other region.
    OtherRegions = 3,
}

impl UsageTerritory {
    /// All usage territories.
    pub const ALL: [UsageTerritory; 3] = [
        Self::TashkentCity,
        Self::TashkentRegion,
        Self::OtherRegions,
    ];

    /// Returns the numeric territory id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for UsageTerritory {
    type Error = ParseEnumError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::TashkentCity),
            2 => Ok(Self::TashkentRegion),
            3 => Ok(Self::OtherRegions),
            _ => Err(ParseEnumError::InvalidValue(
                "UsageTerritory",
                value.to_string(),
            )),
        }
    }
}

impl From<UsageTerritory> for i64 {
    fn from(value: UsageTerritory) -> Self {
        value.id()
    }
}

impl fmt::Display for UsageTerritory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TashkentCity => write!(f, "TASHKENT_CITY"),
            Self::TashkentRegion => write!(f, "TASHKENT_REGION"),
            Self::OtherRegions => write!(f, "OTHER_REGIONS"),
        }
    }
}

/// Error returned when parsing an enum from a string or code fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
