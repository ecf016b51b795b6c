//! # Calculation Context
//!
//! Shared fields every request builder needs, derived once per Calc call
//! from the cached [`ResolvedIdentity`], plus the validated calculation
//! parameters.

use crate::domain::entities::identity::ResolvedIdentity;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{DriverRestriction, PeriodCode, UsageTerritory, VehicleClass};
use serde::{Deserialize, Serialize};

/// Validated calculation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalcParams {
    /// Coverage period.
    pub period: PeriodCode,
    /// Driver list restriction.
    pub driver_restriction: DriverRestriction,
}

impl CalcParams {
    /// Creates calculation parameters.
    #[must_use]
    pub const fn new(period: PeriodCode, driver_restriction: DriverRestriction) -> Self {
        Self {
            period,
            driver_restriction,
        }
    }
}

/// Identity of the policy holder or the driver, as far as builders need it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyIdentity {
    /// Personal identification number.
    pub pinfl: Option<String>,
    /// Passport series.
    pub passport_series: Option<String>,
    /// Passport number.
    pub passport_number: Option<String>,
    /// Taxpayer number (organizations only).
    pub inn: Option<String>,
    /// Birth date as returned by the registry.
    pub birth_date: Option<String>,
}

/// Fields shared by all request builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcContext {
    /// Plate number.
    pub gov_number: String,
    /// Tech-passport series.
    pub tech_passport_series: String,
    /// Tech-passport number.
    pub tech_passport_number: String,
    /// Raw registry vehicle type id.
    pub vehicle_type_id: Option<i64>,
    /// Raw registry vehicle group id.
    pub vehicle_group_id: Option<i64>,
    /// Normalized vehicle class.
    pub vehicle_class: Option<VehicleClass>,
    /// Normalized usage territory.
    pub territory: Option<UsageTerritory>,
    /// Registered owner.
    pub owner: PartyIdentity,
    /// Looked-up person, who drives the vehicle.
    pub driver: Option<PartyIdentity>,
    /// Ownership flag; `false` when unknown.
    pub is_owner: bool,
}

impl CalcContext {
    /// Derives the context from a cached identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteVehicleData` if the vehicle, its plate
    /// or its tech-passport series or number is missing.
    pub fn from_identity(identity: &ResolvedIdentity) -> DomainResult<Self> {
        let Some(vehicle) = identity.vehicle.as_ref() else {
            return Err(DomainError::IncompleteVehicleData {
                missing: vec!["vehicle"],
            });
        };

        let gov_number = required(&vehicle.gov_number);
        let series = required(&vehicle.tech_passport_series);
        let number = required(&vehicle.tech_passport_number);

        let (Some(gov_number), Some(series), Some(number)) = (gov_number, series, number) else {
            let missing = [
                ("gov_number", &vehicle.gov_number),
                ("tech_passport_series", &vehicle.tech_passport_series),
                ("tech_passport_number", &vehicle.tech_passport_number),
            ]
            .into_iter()
            .filter(|(_, value)| required(value).is_none())
            .map(|(name, _)| name)
            .collect();
            return Err(DomainError::IncompleteVehicleData { missing });
        };

        let owner = vehicle
            .owner
            .as_ref()
            .map(|owner| PartyIdentity {
                pinfl: owner.pinfl.clone(),
                passport_series: owner.passport_series.clone(),
                passport_number: owner.passport_number.clone(),
                inn: owner.inn.clone(),
                birth_date: None,
            })
            .unwrap_or_default();

        let driver = identity.person.as_ref().map(|person| PartyIdentity {
            pinfl: person.pinfl.clone(),
            passport_series: person.passport_series.clone(),
            passport_number: person.passport_number.clone(),
            inn: None,
            birth_date: person.birth_date.clone(),
        });

        Ok(Self {
            gov_number,
            tech_passport_series: series,
            tech_passport_number: number,
            vehicle_type_id: vehicle.vehicle_type_id,
            vehicle_group_id: vehicle.vehicle_group_id,
            vehicle_class: VehicleClass::from_registry(
                vehicle.vehicle_type_id,
                vehicle.vehicle_group_id,
            ),
            territory: vehicle
                .use_territory_id
                .and_then(|id| UsageTerritory::try_from(id).ok()),
            owner,
            driver,
            is_owner: identity.is_owner.unwrap_or(false),
        })
    }

    /// Returns the party applying for the policy: the driver when they own
    /// the vehicle, otherwise the registered owner.
    #[must_use]
    pub fn applicant(&self) -> &PartyIdentity {
        match (&self.driver, self.is_owner) {
            (Some(driver), true) => driver,
            _ => &self.owner,
        }
    }
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
