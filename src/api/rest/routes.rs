//! # REST Routes
//!
//! Router construction.

use crate::api::rest::handlers::{AppState, calculate_quotes, find_identity, health};
use axum::Router;
use axum::routing::{get, post};
use std::future::Future;
use std::io;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Builds the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/osago/find", post(find_identity))
        .route("/osago/calc", post(calculate_quotes))
        .route("/health", get(health));

    Router::new()
        .nest("/api/v1", api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Resolves once `signal` fires, for `axum::serve(..).with_graceful_shutdown`.
///
/// If the signal handler cannot be installed this never resolves, so the
/// server keeps running instead of stopping at startup.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::use_cases::{IdentityResolver, QuoteOrchestrator};
    use crate::config::SessionConfig;
    use crate::domain::entities::{PersonRecord, VehicleRecord};
    use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
    use crate::infrastructure::providers::registry::{IdentityRegistry, PersonQuery, VehicleQuery};
    use crate::infrastructure::session::InMemorySessionStore;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct UnreachableRegistry;

    #[async_trait]
    impl IdentityRegistry for UnreachableRegistry {
        async fn lookup_vehicle(&self, _query: &VehicleQuery) -> ProviderResult<VehicleRecord> {
            Err(ProviderError::connection("registry unreachable"))
        }

        async fn lookup_person(&self, _query: &PersonQuery) -> ProviderResult<PersonRecord> {
            Err(ProviderError::connection("registry unreachable"))
        }
    }

    fn router() -> Router {
        let store = Arc::new(InMemorySessionStore::new());
        let config = SessionConfig::default();
        let state = AppState {
            resolver: IdentityResolver::new(Arc::new(UnreachableRegistry), store.clone(), &config),
            orchestrator: QuoteOrchestrator::new(BTreeMap::new(), store, config.namespace),
        };
        create_router(Arc::new(state))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let request = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, body) = send(post_json("/api/v1/osago/find", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }

    #[tokio::test]
    async fn empty_find_is_bad_request() {
        let (status, _) = send(post_json("/api/v1/osago/find", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unresolved_find_is_bad_gateway() {
        let body = r#"{"gov_number":"01A123BC","tech_passport_series":"AAB",
            "tech_passport_number":"1234567"}"#;
        let (status, body) = send(post_json("/api/v1/osago/find", body)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "lookup_failed");
        assert_eq!(body["errors"][0]["side"], "vehicle");
        assert_eq!(body["errors"][0]["kind"], "connection");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let body = r#"{"session_id":"6f1c2a52-8a43-4a8e-9d7e-0c1f6b1d2e3f",
            "period_code":12,"driver_restriction":0}"#;
        let (status, body) = send(post_json("/api/v1/osago/calc", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "session_not_found");
    }

    #[tokio::test]
    async fn invalid_period_is_bad_request() {
        let body = r#"{"session_id":"6f1c2a52-8a43-4a8e-9d7e-0c1f6b1d2e3f",
            "period_code":5,"driver_restriction":0}"#;
        let (status, body) = send(post_json("/api/v1/osago/calc", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_period");
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_waits_for_the_signal() {
        let fired = tokio::time::timeout(Duration::from_secs(1), shutdown_on(async { Ok(()) }));
        assert!(fired.await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn broken_signal_handler_never_shuts_down() {
        let broken = shutdown_on(async { Err(io::Error::other("no signal handler")) });
        let outcome = tokio::time::timeout(Duration::from_secs(3600), broken).await;
        assert!(outcome.is_err());
    }
}
