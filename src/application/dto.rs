//! # Data Transfer Objects
//!
//! Request and response types of the Find and Calc operations, as they
//! appear on the wire.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{CalcParams, PersonRecord, VehicleRecord};
use crate::domain::value_objects::{
    DriverRestriction, NormalizedPremium, PeriodCode, ProviderName, SessionId,
};
use crate::infrastructure::providers::error::ProviderError;
use crate::infrastructure::providers::registry::{PersonQuery, VehicleQuery};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Find
// ============================================================================

/// Find request. Either side may be omitted; blank strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindRequest {
    /// Plate number.
    #[serde(default)]
    pub gov_number: Option<String>,
    /// Tech-passport series.
    #[serde(default)]
    pub tech_passport_series: Option<String>,
    /// Tech-passport number.
    #[serde(default)]
    pub tech_passport_number: Option<String>,
    /// Birth date, `YYYY-MM-DD` or `DD.MM.YYYY`.
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Passport series.
    #[serde(default)]
    pub passport_series: Option<String>,
    /// Passport number.
    #[serde(default)]
    pub passport_number: Option<String>,
    /// Personal identification number.
    #[serde(default)]
    pub pinfl: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

const BIRTH_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// Normalizes a birth date to `YYYY-MM-DD`.
fn normalize_birth_date(raw: &str) -> Option<String> {
    BIRTH_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

impl FindRequest {
    /// Creates a vehicle-only request.
    #[must_use]
    pub fn vehicle(
        gov_number: impl Into<String>,
        tech_passport_series: impl Into<String>,
        tech_passport_number: impl Into<String>,
    ) -> Self {
        Self {
            gov_number: Some(gov_number.into()),
            tech_passport_series: Some(tech_passport_series.into()),
            tech_passport_number: Some(tech_passport_number.into()),
            ..Default::default()
        }
    }

    /// Adds a PINFL to the request.
    #[must_use]
    pub fn with_pinfl(mut self, pinfl: impl Into<String>) -> Self {
        self.pinfl = Some(pinfl.into());
        self
    }

    /// Adds passport and birth date to the request.
    #[must_use]
    pub fn with_passport(
        mut self,
        series: impl Into<String>,
        number: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        self.passport_series = Some(series.into());
        self.passport_number = Some(number.into());
        self.birth_date = Some(birth_date.into());
        self
    }

    fn has_vehicle_data(&self) -> bool {
        [
            &self.gov_number,
            &self.tech_passport_series,
            &self.tech_passport_number,
        ]
        .into_iter()
        .any(|v| present(v).is_some())
    }

    fn has_person_data(&self) -> bool {
        [
            &self.birth_date,
            &self.passport_series,
            &self.passport_number,
            &self.pinfl,
        ]
        .into_iter()
        .any(|v| present(v).is_some())
    }

    /// Checks that at least one side carries data.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidRequest` if every field is unset.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.has_vehicle_data() || self.has_person_data() {
            Ok(())
        } else {
            Err(ApplicationError::invalid_request(
                "either vehicle or person data is required",
            ))
        }
    }

    /// Vehicle lookup key.
    ///
    /// `None` if no vehicle field is set; `Some(Err(..))` naming the missing
    /// fields if the side is only partly filled.
    #[must_use]
    pub fn vehicle_query(&self) -> Option<Result<VehicleQuery, String>> {
        if !self.has_vehicle_data() {
            return None;
        }
        let fields = [
            ("gov_number", present(&self.gov_number)),
            ("tech_passport_series", present(&self.tech_passport_series)),
            ("tech_passport_number", present(&self.tech_passport_number)),
        ];
        match fields {
            [(_, Some(gov)), (_, Some(series)), (_, Some(number))] => Some(Ok(VehicleQuery {
                gov_number: gov.to_uppercase(),
                tech_passport_series: series.to_uppercase(),
                tech_passport_number: number.to_string(),
            })),
            _ => Some(Err(missing_fields(&fields))),
        }
    }

    /// Person lookup key: PINFL when present, otherwise passport and birth
    /// date.
    ///
    /// `None` if no person field is set; `Some(Err(..))` naming the missing
    /// fields if neither key is complete.
    #[must_use]
    pub fn person_query(&self) -> Option<Result<PersonQuery, String>> {
        if !self.has_person_data() {
            return None;
        }
        if let Some(pinfl) = present(&self.pinfl) {
            return Some(Ok(PersonQuery::Pinfl(pinfl.to_string())));
        }
        let fields = [
            ("passport_series", present(&self.passport_series)),
            ("passport_number", present(&self.passport_number)),
            ("birth_date", present(&self.birth_date)),
        ];
        match fields {
            [(_, Some(series)), (_, Some(number)), (_, Some(birth_date))] => {
                let Some(birth_date) = normalize_birth_date(birth_date) else {
                    return Some(Err(format!("invalid birth_date {birth_date:?}")));
                };
                Some(Ok(PersonQuery::Passport {
                    series: series.to_uppercase(),
                    number: number.to_string(),
                    birth_date,
                }))
            }
            _ => Some(Err(missing_fields(&fields))),
        }
    }
}

fn missing_fields(fields: &[(&str, Option<&str>)]) -> String {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
    format!("missing {}", missing.join(", "))
}

/// Lookup side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSide {
    /// Vehicle lookup.
    Vehicle,
    /// Person lookup.
    Person,
}

impl fmt::Display for LookupSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vehicle => write!(f, "vehicle"),
            Self::Person => write!(f, "person"),
        }
    }
}

/// One failed lookup side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupFailure {
    /// Side that failed.
    pub side: LookupSide,
    /// Failure kind, as in provider error slots.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl LookupFailure {
    /// Creates a lookup failure.
    #[must_use]
    pub fn new(side: LookupSide, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            side,
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates a lookup failure from a partner error.
    #[must_use]
    pub fn from_provider(side: LookupSide, error: &ProviderError) -> Self {
        Self::new(side, error.kind(), error.to_string())
    }
}

/// Find response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindResponse {
    /// Session to pass to Calc.
    pub session_id: SessionId,
    /// Resolved vehicle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<VehicleRecord>,
    /// Resolved person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<PersonRecord>,
    /// Ownership flag, present only when both sides resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
    /// Sides that failed.
    #[serde(default)]
    pub errors: Vec<LookupFailure>,
}

// ============================================================================
// Calc
// ============================================================================

/// Calc request with raw wire codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcRequest {
    /// Session minted by Find.
    pub session_id: String,
    /// Period code.
    pub period_code: i64,
    /// Driver restriction code.
    pub driver_restriction: i64,
}

impl CalcRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(session_id: impl Into<String>, period_code: i64, driver_restriction: i64) -> Self {
        Self {
            session_id: session_id.into(),
            period_code,
            driver_restriction,
        }
    }

    /// Validates the codes and the session id shape.
    ///
    /// A well-formed but non-UUID session id can never exist and is reported
    /// as not found.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod`, `InvalidDriverRestriction`, `InvalidRequest`
    /// for an empty session id, or `SessionNotFound`.
    pub fn validate(&self) -> ApplicationResult<(SessionId, CalcParams)> {
        let period = PeriodCode::try_from(self.period_code)
            .map_err(|_| ApplicationError::InvalidPeriod(self.period_code))?;
        let driver_restriction = DriverRestriction::try_from(self.driver_restriction)
            .map_err(|_| ApplicationError::InvalidDriverRestriction(self.driver_restriction))?;
        let raw = self.session_id.trim();
        if raw.is_empty() {
            return Err(ApplicationError::invalid_request("session_id is required"));
        }
        let session_id = raw
            .parse::<SessionId>()
            .map_err(|_| ApplicationError::session_not_found(raw))?;
        Ok((session_id, CalcParams::new(period, driver_restriction)))
    }
}

/// Why a provider was not asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The provider does not sell the requested period.
    IneligiblePeriod,
    /// A normalized input has no provider code.
    MappingUnsupported,
}

/// Outcome for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderSlot {
    /// Raw provider-native response.
    Response {
        /// Response body.
        response: Value,
    },
    /// The provider was skipped.
    NotAvailable {
        /// Skip reason.
        reason: UnavailableReason,
    },
    /// The provider call failed.
    Error {
        /// Error kind, e.g. `timeout`.
        kind: String,
        /// Error message.
        message: String,
    },
}

impl ProviderSlot {
    /// Creates an error slot from a partner error.
    #[must_use]
    pub fn from_error(error: &ProviderError) -> Self {
        Self::Error {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }

    /// Returns true if the provider was called.
    #[must_use]
    pub fn was_dispatched(&self) -> bool {
        !matches!(self, Self::NotAvailable { .. })
    }
}

/// Calc response: one slot per provider plus the normalized premiums.
///
/// Serialized flat, e.g. `{"session_id": .., "neo": {..}, .., "result": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResponse {
    /// Session the quotes were computed for.
    pub session_id: SessionId,
    /// Per-provider outcomes.
    #[serde(flatten)]
    pub providers: BTreeMap<ProviderName, ProviderSlot>,
    /// Normalized premium per provider.
    pub result: BTreeMap<ProviderName, NormalizedPremium>,
}

impl CalcResponse {
    /// Returns the slot of a provider.
    #[must_use]
    pub fn slot(&self, provider: ProviderName) -> Option<&ProviderSlot> {
        self.providers.get(&provider)
    }

    /// Returns the normalized premium of a provider.
    #[must_use]
    pub fn premium(&self, provider: ProviderName) -> NormalizedPremium {
        self.result.get(&provider).copied().unwrap_or_default()
    }
}
