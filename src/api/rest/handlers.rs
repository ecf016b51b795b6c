//! # REST Handlers
//!
//! Request handlers and the JSON error envelope.

use crate::application::dto::{CalcRequest, CalcResponse, FindRequest, FindResponse, LookupFailure};
use crate::application::error::ApplicationError;
use crate::application::use_cases::{IdentityResolver, QuoteOrchestrator};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    /// Find use case.
    pub resolver: IdentityResolver,
    /// Calc use case.
    pub orchestrator: QuoteOrchestrator,
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code, e.g. `session_not_found`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Per-side failures of a Find that resolved nothing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<LookupFailure>,
}

/// Health check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// An [`ApplicationError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ApplicationError::invalid_request(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "request failed");
        } else {
            warn!(code = self.0.code(), error = %self.0, "request rejected");
        }
        let code = self.0.code().to_string();
        let message = self.0.to_string();
        let errors = match self.0 {
            ApplicationError::LookupFailed { errors } => errors,
            _ => Vec::new(),
        };
        let body = Json(ErrorResponse {
            code,
            message,
            errors,
        });
        (status, body).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// `POST /api/v1/osago/find`
///
/// # Errors
///
/// Returns 400 for a malformed request and 502 when nothing resolved.
pub async fn find_identity(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FindRequest>, JsonRejection>,
) -> ApiResult<Json<FindResponse>> {
    let Json(request) = payload?;
    let response = state.resolver.find(request).await?;
    Ok(Json(response))
}

/// `POST /api/v1/osago/calc`
///
/// # Errors
///
/// Returns 400 for invalid codes, 404 for an unknown session and 422 when
/// the cached vehicle cannot be quoted.
pub async fn calculate_quotes(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CalcRequest>, JsonRejection>,
) -> ApiResult<Json<CalcResponse>> {
    let Json(request) = payload?;
    let response = state.orchestrator.calculate(request).await?;
    Ok(Json(response))
}

/// `GET /api/v1/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
