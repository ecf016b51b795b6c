//! # Find Identity Use Case
//!
//! Resolves a vehicle and a person from the registry and caches the result
//! as a session for Calc.
//!
//! # Flow
//!
//! 1. Reject a request with no data on either side
//! 2. Look up the vehicle and the person concurrently, each side only if it
//!    carries data; one side failing does not stop the other
//! 3. Derive `is_owner` when both sides resolved
//! 4. Fail with `LookupFailed` if nothing resolved, writing no session
//! 5. Store the identity under a fresh session id with the configured TTL

use crate::application::dto::{FindRequest, FindResponse, LookupFailure, LookupSide};
use crate::application::error::{ApplicationError, ApplicationResult, InfrastructureError};
use crate::config::SessionConfig;
use crate::domain::entities::{PersonRecord, ResolvedIdentity, VehicleRecord};
use crate::domain::value_objects::SessionId;
use crate::infrastructure::providers::registry::IdentityRegistry;
use crate::infrastructure::session::SessionStore;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Identity resolver.
pub struct IdentityResolver {
    registry: Arc<dyn IdentityRegistry>,
    sessions: Arc<dyn SessionStore>,
    namespace: String,
    ttl: Duration,
}

impl fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("namespace", &self.namespace)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl IdentityResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(
        registry: Arc<dyn IdentityRegistry>,
        sessions: Arc<dyn SessionStore>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            registry,
            sessions,
            namespace: config.namespace.clone(),
            ttl: Duration::from_secs(config.ttl_secs),
        }
    }

    /// Resolves the identity and stores it as a session.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if neither side has data
    /// - `LookupFailed` if no side resolved
    /// - `Infrastructure` if the session cannot be stored
    #[instrument(skip_all)]
    pub async fn find(&self, request: FindRequest) -> ApplicationResult<FindResponse> {
        request.validate()?;

        let (vehicle, person) = tokio::join!(
            self.resolve_vehicle(&request),
            self.resolve_person(&request)
        );

        let mut errors = Vec::new();
        let vehicle = settle(vehicle, &mut errors);
        let person = settle(person, &mut errors);

        let identity = ResolvedIdentity::new(vehicle, person);
        if identity.is_empty() {
            warn!(failed_sides = errors.len(), "identity lookup resolved nothing");
            return Err(ApplicationError::LookupFailed { errors });
        }

        let session_id = SessionId::new_v4();
        let payload = serde_json::to_string(&identity)
            .map_err(|e| InfrastructureError::serialization(e.to_string()))?;
        self.sessions
            .put(&session_id.store_key(&self.namespace), payload, self.ttl)
            .await?;

        info!(
            %session_id,
            vehicle = identity.vehicle.is_some(),
            person = identity.person.is_some(),
            is_owner = ?identity.is_owner,
            failed_sides = errors.len(),
            "identity resolved"
        );

        let ResolvedIdentity {
            vehicle,
            person,
            is_owner,
        } = identity;
        Ok(FindResponse {
            session_id,
            vehicle,
            person,
            is_owner,
            errors,
        })
    }

    async fn resolve_vehicle(
        &self,
        request: &FindRequest,
    ) -> Option<Result<VehicleRecord, LookupFailure>> {
        let side = LookupSide::Vehicle;
        let query = match request.vehicle_query()? {
            Ok(query) => query,
            Err(message) => {
                return Some(Err(LookupFailure::new(side, "invalid_request", message)));
            }
        };
        Some(
            self.registry
                .lookup_vehicle(&query)
                .await
                .map_err(|e| LookupFailure::from_provider(side, &e)),
        )
    }

    async fn resolve_person(
        &self,
        request: &FindRequest,
    ) -> Option<Result<PersonRecord, LookupFailure>> {
        let side = LookupSide::Person;
        let query = match request.person_query()? {
            Ok(query) => query,
            Err(message) => {
                return Some(Err(LookupFailure::new(side, "invalid_request", message)));
            }
        };
        Some(
            self.registry
                .lookup_person(&query)
                .await
                .map_err(|e| LookupFailure::from_provider(side, &e)),
        )
    }
}

fn settle<T>(
    outcome: Option<Result<T, LookupFailure>>,
    errors: &mut Vec<LookupFailure>,
) -> Option<T> {
    match outcome? {
        Ok(record) => Some(record),
        Err(failure) => {
            warn!(side = %failure.side, kind = %failure.kind, "lookup side failed");
            errors.push(failure);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::OwnerRecord;
    use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
    use crate::infrastructure::providers::registry::{PersonQuery, VehicleQuery};
    use crate::infrastructure::session::InMemorySessionStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct FakeRegistry {
        vehicle: Option<VehicleRecord>,
        person: Option<PersonRecord>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IdentityRegistry for FakeRegistry {
        async fn lookup_vehicle(&self, _query: &VehicleQuery) -> ProviderResult<VehicleRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.vehicle
                .clone()
                .ok_or_else(|| ProviderError::status(502, "registry down"))
        }

        async fn lookup_person(&self, _query: &PersonQuery) -> ProviderResult<PersonRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.person
                .clone()
                .ok_or_else(|| ProviderError::timeout("person lookup timed out"))
        }
    }

    fn car_owned_by(series: &str, number: &str) -> VehicleRecord {
        VehicleRecord {
            gov_number: Some("01A123BC".to_string()),
            tech_passport_series: Some("AAB".to_string()),
            tech_passport_number: Some("1234567".to_string()),
            vehicle_type_id: Some(2),
            use_territory_id: Some(1),
            owner: Some(OwnerRecord {
                passport_series: Some(series.to_string()),
                passport_number: Some(number.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn person(series: &str, number: &str) -> PersonRecord {
        PersonRecord {
            passport_series: Some(series.to_string()),
            passport_number: Some(number.to_string()),
            pinfl: Some("30101900000011".to_string()),
            ..Default::default()
        }
    }

    fn resolver(
        registry: FakeRegistry,
    ) -> (IdentityResolver, InMemorySessionStore, Arc<FakeRegistry>) {
        let registry = Arc::new(registry);
        let store = InMemorySessionStore::new();
        let resolver = IdentityResolver::new(
            registry.clone(),
            Arc::new(store.clone()),
            &SessionConfig::default(),
        );
        (resolver, store, registry)
    }

    #[tokio::test]
    async fn vehicle_only_find() {
        let (resolver, store, _) = resolver(FakeRegistry {
            vehicle: Some(car_owned_by("AA", "7654321")),
            ..Default::default()
        });
        let response = resolver
            .find(FindRequest::vehicle("01A123BC", "AAB", "1234567"))
            .await
            .unwrap();

        assert!(response.vehicle.is_some());
        assert!(response.person.is_none());
        assert_eq!(response.is_owner, None);
        assert!(response.errors.is_empty());

        let key = response.session_id.store_key("osago");
        let stored: ResolvedIdentity =
            serde_json::from_str(&store.get(&key).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored.vehicle, response.vehicle);
    }

    #[tokio::test]
    async fn both_sides_derive_ownership() {
        let (resolver, _, _) = resolver(FakeRegistry {
            vehicle: Some(car_owned_by("AA", "7654321")),
            person: Some(person("AA", "7654321")),
            ..Default::default()
        });
        let request =
            FindRequest::vehicle("01A123BC", "AAB", "1234567").with_pinfl("30101900000011");
        let response = resolver.find(request).await.unwrap();
        assert_eq!(response.is_owner, Some(true));
    }

    #[tokio::test]
    async fn different_passport_is_not_owner() {
        let (resolver, _, _) = resolver(FakeRegistry {
            vehicle: Some(car_owned_by("AA", "7654321")),
            person: Some(person("AB", "1111111")),
            ..Default::default()
        });
        let request =
            FindRequest::vehicle("01A123BC", "AAB", "1234567").with_pinfl("30101900000011");
        let response = resolver.find(request).await.unwrap();
        assert_eq!(response.is_owner, Some(false));
    }

    #[tokio::test]
    async fn one_failed_side_is_reported_not_fatal() {
        let (resolver, _, registry) = resolver(FakeRegistry {
            vehicle: Some(car_owned_by("AA", "7654321")),
            ..Default::default()
        });
        let request =
            FindRequest::vehicle("01A123BC", "AAB", "1234567").with_pinfl("30101900000011");
        let response = resolver.find(request).await.unwrap();

        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
        assert!(response.vehicle.is_some());
        assert_eq!(response.is_owner, None);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].side, LookupSide::Person);
        assert_eq!(response.errors[0].kind, "timeout");
    }

    #[tokio::test]
    async fn nothing_resolved_fails_without_session() {
        let (resolver, store, _) = resolver(FakeRegistry::default());
        let err = resolver
            .find(FindRequest::vehicle("01A123BC", "AAB", "1234567"))
            .await
            .unwrap_err();
        match err {
            ApplicationError::LookupFailed { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, "http_status");
            }
            other => unreachable!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn empty_request_does_no_io() {
        let (resolver, _, registry) = resolver(FakeRegistry::default());
        let err = resolver.find(FindRequest::default()).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(registry.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn partial_side_fails_without_a_call() {
        let (resolver, _, registry) = resolver(FakeRegistry {
            person: Some(person("AA", "7654321")),
            ..Default::default()
        });
        let request = FindRequest {
            gov_number: Some("01A123BC".to_string()),
            pinfl: Some("30101900000011".to_string()),
            ..Default::default()
        };
        let response = resolver.find(request).await.unwrap();
        assert_eq!(registry.calls.load(Ordering::SeqCst), 1);
        assert!(response.person.is_some());
        assert_eq!(response.errors[0].side, LookupSide::Vehicle);
        assert_eq!(response.errors[0].kind, "invalid_request");
    }
}
