//! # Calculate Quotes Use Case
//!
//! Fans one normalized calculation out to every eligible partner and
//! collects one comparable premium per partner.
//!
//! # Flow
//!
//! 1. Validate period, driver restriction and session id (no I/O)
//! 2. Load the cached identity; absent or expired is `SessionNotFound`
//! 3. Derive the shared [`CalcContext`]
//! 4. Per provider: skip if the period is not sold, skip if a normalized
//!    input has no provider code, otherwise build the request
//! 5. Dispatch every built request concurrently, each under its client's
//!    timeout, and wait for all of them
//! 6. Normalize every slot into a premium or `"does not exist"`
//!
//! Partner failures only ever land in the partner's own slot. Once
//! validation and session loading passed, Calc always returns all five
//! slots.

use crate::application::dto::{CalcRequest, CalcResponse, ProviderSlot, UnavailableReason};
use crate::application::error::{ApplicationError, ApplicationResult, InfrastructureError};
use crate::application::services::fan_out::{DispatchFailure, FanOutTask, dispatch_all};
use crate::application::services::normalizer::normalize_all;
use crate::domain::entities::{CalcContext, CalcParams, ResolvedIdentity};
use crate::domain::value_objects::{ProviderName, SessionId};
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::{ProviderClient, ProviderRequest};
use crate::infrastructure::providers::build_request;
use crate::infrastructure::session::SessionStore;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Partner clients keyed by provider.
pub type ProviderClients = BTreeMap<ProviderName, Arc<dyn ProviderClient>>;

/// Quote orchestrator.
pub struct QuoteOrchestrator {
    clients: ProviderClients,
    sessions: Arc<dyn SessionStore>,
    namespace: String,
}

impl fmt::Debug for QuoteOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuoteOrchestrator")
            .field("providers", &self.clients.keys().collect::<Vec<_>>())
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl QuoteOrchestrator {
    /// Creates an orchestrator.
    #[must_use]
    pub fn new(
        clients: ProviderClients,
        sessions: Arc<dyn SessionStore>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            clients,
            sessions,
            namespace: namespace.into(),
        }
    }

    /// Calculates quotes for a cached identity.
    ///
    /// # Errors
    ///
    /// - `InvalidPeriod`, `InvalidDriverRestriction`, `InvalidRequest` for a
    ///   malformed request
    /// - `SessionNotFound` if the session is absent or expired
    /// - `IncompleteVehicleData` if the cached vehicle cannot be quoted
    /// - `Infrastructure` if the session cannot be read or decoded
    #[instrument(skip_all, fields(period = request.period_code))]
    pub async fn calculate(&self, request: CalcRequest) -> ApplicationResult<CalcResponse> {
        let (session_id, params) = request.validate()?;
        let identity = self.load_identity(&session_id).await?;
        let ctx = CalcContext::from_identity(&identity)?;

        let mut providers = BTreeMap::new();
        let mut tasks = Vec::new();
        for provider in ProviderName::ALL {
            match self.prepare(provider, &ctx, &params) {
                Ok((client, provider_request)) => {
                    let limit = Duration::from_millis(client.timeout_ms());
                    tasks.push(FanOutTask::new(
                        provider,
                        limit,
                        call_provider(client, provider_request),
                    ));
                }
                Err(slot) => {
                    providers.insert(provider, slot);
                }
            }
        }

        let dispatched = tasks.len();
        for (provider, outcome) in dispatch_all(tasks).await {
            let slot = match outcome {
                Ok(body) => ProviderSlot::Response { response: body },
                Err(failure) => {
                    let error = into_provider_error(failure);
                    warn!(%provider, kind = error.kind(), "provider call failed");
                    ProviderSlot::from_error(&error)
                }
            };
            providers.insert(provider, slot);
        }

        let result = normalize_all(&providers);
        info!(
            %session_id,
            dispatched,
            quoted = result.values().filter(|p| p.exists()).count(),
            "quotes calculated"
        );

        Ok(CalcResponse {
            session_id,
            providers,
            result,
        })
    }

    async fn load_identity(&self, session_id: &SessionId) -> ApplicationResult<ResolvedIdentity> {
        let payload = self
            .sessions
            .get(&session_id.store_key(&self.namespace))
            .await?
            .ok_or_else(|| ApplicationError::session_not_found(session_id.to_string()))?;
        serde_json::from_str(&payload).map_err(|e| {
            InfrastructureError::serialization(format!("session payload: {e}")).into()
        })
    }

    /// Decides whether a provider is called, and with what.
    fn prepare(
        &self,
        provider: ProviderName,
        ctx: &CalcContext,
        params: &CalcParams,
    ) -> Result<(Arc<dyn ProviderClient>, ProviderRequest), ProviderSlot> {
        if !provider.supports_period(params.period) {
            return Err(ProviderSlot::NotAvailable {
                reason: UnavailableReason::IneligiblePeriod,
            });
        }
        let request = build_request(provider, ctx, params).map_err(|e| {
            debug!(%provider, field = e.field, value = %e.value, "no provider mapping");
            ProviderSlot::NotAvailable {
                reason: UnavailableReason::MappingUnsupported,
            }
        })?;
        let client = self.clients.get(&provider).cloned().ok_or_else(|| {
            ProviderSlot::from_error(&ProviderError::internal(format!(
                "no client configured for {provider}"
            )))
        })?;
        Ok((client, request))
    }
}

async fn call_provider(
    client: Arc<dyn ProviderClient>,
    request: ProviderRequest,
) -> ProviderResult<Value> {
    client.call(request).await?.into_success()
}

fn into_provider_error(failure: DispatchFailure<ProviderError>) -> ProviderError {
    match failure {
        DispatchFailure::Failed(error) => error,
        DispatchFailure::TimedOut(limit) => {
            let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            ProviderError::timeout_with_duration("provider call timed out", millis)
        }
        DispatchFailure::Panicked(message) => ProviderError::panicked(message),
    }
}
