//! # Resolved Identity
//!
//! Vehicle and person records returned by the partner registry, and the
//! [`ResolvedIdentity`] cached as a session payload.
//!
//! Registry records are kept opaque: the fields the engine reads are typed,
//! every other field the registry returns is carried along verbatim in
//! `extra` so callers see the full record.
//!
//! # Ownership
//!
//! `is_owner` compares passport series and number of the looked-up person
//! with the registered owner of the vehicle. Any missing field yields
//! `false`, which makes "not the owner" indistinguishable from "unknown".
//! Callers rely on the flag never being null once both records resolved,
//! so the ambiguity is kept as is.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered owner of a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnerRecord {
    /// Personal identification number, when the owner is a person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinfl: Option<String>,
    /// Passport series, when the owner is a person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_series: Option<String>,
    /// Passport number, when the owner is a person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    /// Taxpayer number, when the owner is an organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    /// Remaining registry fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OwnerRecord {
    /// Returns true if the owner is an organization.
    #[must_use]
    pub fn is_organization(&self) -> bool {
        self.inn.as_deref().is_some_and(|inn| !inn.trim().is_empty())
    }
}

/// Vehicle record from the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Plate number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gov_number: Option<String>,
    /// Tech-passport series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_passport_series: Option<String>,
    /// Tech-passport number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_passport_number: Option<String>,
    /// Registry vehicle type id.
    #[serde(
        default,
        deserialize_with = "lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_type_id: Option<i64>,
    /// Registry vehicle group id.
    #[serde(
        default,
        deserialize_with = "lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_group_id: Option<i64>,
    /// Usage territory id.
    #[serde(
        default,
        deserialize_with = "lenient_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_territory_id: Option<i64>,
    /// Registered owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerRecord>,
    /// Remaining registry fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Person record from the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Passport series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_series: Option<String>,
    /// Passport number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    /// Personal identification number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinfl: Option<String>,
    /// Birth date as returned by the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// Remaining registry fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Session payload written by identity resolution and read by Calc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    /// Resolved vehicle, if the vehicle side was looked up successfully.
    #[serde(default)]
    pub vehicle: Option<VehicleRecord>,
    /// Resolved person, if the person side was looked up successfully.
    #[serde(default)]
    pub person: Option<PersonRecord>,
    /// Ownership flag; set only when both records are present.
    #[serde(default)]
    pub is_owner: Option<bool>,
}

impl ResolvedIdentity {
    /// Builds the identity, deriving the ownership flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use osago_quotes::domain::entities::identity::{ResolvedIdentity, VehicleRecord};
    ///
    /// let identity = ResolvedIdentity::new(Some(VehicleRecord::default()), None);
    /// assert_eq!(identity.is_owner, None);
    /// ```
    #[must_use]
    pub fn new(vehicle: Option<VehicleRecord>, person: Option<PersonRecord>) -> Self {
        let is_owner = match (&vehicle, &person) {
            (Some(vehicle), Some(person)) => Some(is_registered_owner(vehicle, person)),
            _ => None,
        };
        Self {
            vehicle,
            person,
            is_owner,
        }
    }

    /// Returns true if neither side resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicle.is_none() && self.person.is_none()
    }
}

/// Compares the person's passport with the vehicle owner's passport.
///
/// Returns `false` whenever a field on either side is missing or blank.
#[must_use]
pub fn is_registered_owner(vehicle: &VehicleRecord, person: &PersonRecord) -> bool {
    let Some(owner) = vehicle.owner.as_ref() else {
        return false;
    };
    let pairs = [
        (&owner.passport_series, &person.passport_series),
        (&owner.passport_number, &person.passport_number),
    ];
    pairs.iter().all(|(owner_field, person_field)| {
        match (non_blank(owner_field), non_blank(person_field)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts an integer, a numeric string, an empty string or null.
fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected integer code, got {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected integer code, got '{}'", s))),
        Some(other) => Err(de::Error::custom(format!(
            "expected integer code, got {}",
            other
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vehicle_owned_by(series: &str, number: &str) -> VehicleRecord {
        VehicleRecord {
            owner: Some(OwnerRecord {
                passport_series: Some(series.to_string()),
                passport_number: Some(number.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn person(series: Option<&str>, number: Option<&str>) -> PersonRecord {
        PersonRecord {
            passport_series: series.map(str::to_string),
            passport_number: number.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn owner_matches_on_passport() {
        let identity = ResolvedIdentity::new(
            Some(vehicle_owned_by("AA", "1234567")),
            Some(person(Some("AA"), Some("1234567"))),
        );
        assert_eq!(identity.is_owner, Some(true));
    }

    #[test]
    fn different_passport_is_not_owner() {
        let identity = ResolvedIdentity::new(
            Some(vehicle_owned_by("AA", "1234567")),
            Some(person(Some("AB"), Some("1234567"))),
        );
        assert_eq!(identity.is_owner, Some(false));
    }

    #[test]
    fn missing_field_is_false_not_error() {
        let identity = ResolvedIdentity::new(
            Some(vehicle_owned_by("AA", "1234567")),
            Some(person(Some("AA"), None)),
        );
        assert_eq!(identity.is_owner, Some(false));

        let identity = ResolvedIdentity::new(
            Some(VehicleRecord::default()),
            Some(person(Some("AA"), Some("1234567"))),
        );
        assert_eq!(identity.is_owner, Some(false));
    }

    #[test]
    fn one_sided_identity_has_no_flag() {
        let identity = ResolvedIdentity::new(None, Some(person(Some("AA"), Some("1"))));
        assert_eq!(identity.is_owner, None);
        assert!(!identity.is_empty());
        assert!(ResolvedIdentity::new(None, None).is_empty());
    }

    #[test]
    fn vehicle_keeps_unknown_fields() {
        let raw = json!({
            "gov_number": "01A123BC",
            "tech_passport_series": "AAB",
            "tech_passport_number": "1234567",
            "vehicle_type_id": "2",
            "use_territory_id": 1,
            "model_name": "COBALT",
            "owner": {"pinfl": "30101900000011", "full_name": "ALIYEV ALI"}
        });
        let vehicle: VehicleRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(vehicle.vehicle_type_id, Some(2));
        assert_eq!(vehicle.use_territory_id, Some(1));
        assert_eq!(vehicle.extra["model_name"], "COBALT");
        let owner = vehicle.owner.as_ref().unwrap();
        assert_eq!(owner.extra["full_name"], "ALIYEV ALI");

        let back = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(back["model_name"], "COBALT");
        assert_eq!(back["vehicle_type_id"], 2);
    }

    #[test]
    fn blank_code_reads_as_absent() {
        let vehicle: VehicleRecord =
            serde_json::from_value(json!({"vehicle_group_id": ""})).unwrap();
        assert_eq!(vehicle.vehicle_group_id, None);
    }

    #[test]
    fn organization_owner() {
        let owner = OwnerRecord {
            inn: Some("301234567".to_string()),
            ..Default::default()
        };
        assert!(owner.is_organization());
        assert!(!OwnerRecord::default().is_organization());
    }
}
