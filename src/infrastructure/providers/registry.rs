//! # Identity Registry
//!
//! Vehicle and person lookups against a partner's registry endpoints.
//!
//! The registry answers `{"result": {...record...}}`. A `null` or missing
//! `result` means the registry has no such record; an error envelope
//! (`{"error": ...}`) with a 2xx status is treated the same way.

use crate::config::RegistryConfig;
use crate::domain::entities::{PersonRecord, VehicleRecord};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::{ProviderClient, ProviderRequest};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

/// Vehicle lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleQuery {
    /// Plate number.
    pub gov_number: String,
    /// Tech-passport series.
    pub tech_passport_series: String,
    /// Tech-passport number.
    pub tech_passport_number: String,
}

/// Person lookup key.
#[derive(Clone, PartialEq, Eq)]
pub enum PersonQuery {
    /// Lookup by personal identification number.
    Pinfl(String),
    /// Lookup by passport and birth date.
    Passport {
        /// Passport series.
        series: String,
        /// Passport number.
        number: String,
        /// Birth date as the registry expects it, `YYYY-MM-DD`.
        birth_date: String,
    },
}

// Personal identifiers stay out of logs.
impl fmt::Debug for PersonQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pinfl(_) => f.write_str("PersonQuery::Pinfl(..)"),
            Self::Passport { .. } => f.write_str("PersonQuery::Passport(..)"),
        }
    }
}

impl PersonQuery {
    fn body(&self) -> Value {
        match self {
            Self::Pinfl(pinfl) => json!({ "pinfl": pinfl }),
            Self::Passport {
                series,
                number,
                birth_date,
            } => json!({
                "passport_series": series,
                "passport_number": number,
                "birth_date": birth_date,
            }),
        }
    }
}

/// Registry of vehicles and persons.
#[async_trait]
pub trait IdentityRegistry: Send + Sync + fmt::Debug {
    /// Looks up a vehicle.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if the call fails or no record is found.
    async fn lookup_vehicle(&self, query: &VehicleQuery) -> ProviderResult<VehicleRecord>;

    /// Looks up a person.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if the call fails or no record is found.
    async fn lookup_person(&self, query: &PersonQuery) -> ProviderResult<PersonRecord>;
}

/// Registry backed by one partner's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpIdentityRegistry {
    client: Arc<dyn ProviderClient>,
    vehicle_path: String,
    person_path: String,
}

impl HttpIdentityRegistry {
    /// Creates a registry over the given client.
    #[must_use]
    pub fn new(client: Arc<dyn ProviderClient>, config: &RegistryConfig) -> Self {
        Self {
            client,
            vehicle_path: config.vehicle_path.clone(),
            person_path: config.person_path.clone(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
        what: &str,
    ) -> ProviderResult<T> {
        let reply = self.client.call(ProviderRequest::post(path, body)).await?;
        let body = reply.into_success()?;
        match body.get("result") {
            Some(record) if record.is_object() => T::deserialize(record).map_err(|e| {
                ProviderError::protocol(format!("{what} record could not be decoded: {e}"))
            }),
            _ => Err(ProviderError::protocol(format!("registry has no {what} record"))),
        }
    }
}

#[async_trait]
impl IdentityRegistry for HttpIdentityRegistry {
    async fn lookup_vehicle(&self, query: &VehicleQuery) -> ProviderResult<VehicleRecord> {
        let body = json!({
            "gov_number": query.gov_number,
            "tech_passport_series": query.tech_passport_series,
            "tech_passport_number": query.tech_passport_number,
        });
        self.fetch(&self.vehicle_path, body, "vehicle").await
    }

    async fn lookup_person(&self, query: &PersonQuery) -> ProviderResult<PersonRecord> {
        self.fetch(&self.person_path, query.body(), "person").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::providers::traits::ProviderReply;
    use parking_lot::Mutex;

    #[derive(Debug)]
    struct CannedClient {
        reply: ProviderReply,
        requests: Mutex<Vec<ProviderRequest>>,
    }

    #[async_trait]
    impl ProviderClient for CannedClient {
        fn provider(&self) -> crate::domain::value_objects::ProviderName {
            crate::domain::value_objects::ProviderName::Neo
        }

        fn timeout_ms(&self) -> u64 {
            1_000
        }

        async fn call(&self, request: ProviderRequest) -> ProviderResult<ProviderReply> {
            self.requests.lock().push(request);
            Ok(self.reply.clone())
        }
    }

    fn registry(status: u16, body: Value) -> (HttpIdentityRegistry, Arc<CannedClient>) {
        let client = Arc::new(CannedClient {
            reply: ProviderReply::new(status, body),
            requests: Mutex::new(Vec::new()),
        });
        let registry = HttpIdentityRegistry::new(client.clone(), &RegistryConfig::default());
        (registry, client)
    }

    fn car() -> VehicleQuery {
        VehicleQuery {
            gov_number: "01A123BC".to_string(),
            tech_passport_series: "AAB".to_string(),
            tech_passport_number: "1234567".to_string(),
        }
    }

    #[tokio::test]
    async fn vehicle_record_is_unwrapped_from_result() {
        let (registry, client) = registry(
            200,
            json!({
                "result": {"gov_number": "01A123BC", "vehicle_type_id": "2", "model": "Cobalt"}
            }),
        );
        let vehicle = registry.lookup_vehicle(&car()).await.unwrap();
        assert_eq!(vehicle.gov_number.as_deref(), Some("01A123BC"));
        assert_eq!(vehicle.vehicle_type_id, Some(2));
        assert_eq!(vehicle.extra["model"], "Cobalt");

        let sent = client.requests.lock();
        assert_eq!(sent[0].path, RegistryConfig::default().vehicle_path);
        assert_eq!(sent[0].body.as_ref().unwrap()["tech_passport_series"], "AAB");
    }

    #[tokio::test]
    async fn person_by_pinfl() {
        let (registry, client) = registry(200, json!({"result": {"pinfl": "30101900000011"}}));
        let person = registry
            .lookup_person(&PersonQuery::Pinfl("30101900000011".to_string()))
            .await
            .unwrap();
        assert_eq!(person.pinfl.as_deref(), Some("30101900000011"));
        let sent = client.requests.lock();
        assert_eq!(sent[0].body, Some(json!({"pinfl": "30101900000011"})));
    }

    #[tokio::test]
    async fn null_result_is_not_found() {
        let (registry, _) = registry(200, json!({"result": null, "error": "not found"}));
        let err = registry.lookup_vehicle(&car()).await.unwrap_err();
        assert_eq!(err.kind(), "protocol");
    }

    #[tokio::test]
    async fn non_success_status_is_surfaced() {
        let (registry, _) = registry(502, json!("bad gateway"));
        let err = registry.lookup_vehicle(&car()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(502));
    }

    #[test]
    fn person_query_debug_hides_identifiers() {
        let query = PersonQuery::Passport {
            series: "AA".to_string(),
            number: "7654321".to_string(),
            birth_date: "1990-01-01".to_string(),
        };
        assert!(!format!("{query:?}").contains("7654321"));
    }
}
