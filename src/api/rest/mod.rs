//! # REST API
//!
//! JSON endpoints over the two engine operations, using axum.
//!
//! # Endpoints
//!
//! ## OSAGO
//! - `POST /api/v1/osago/find` - Resolve vehicle and person, open a session
//! - `POST /api/v1/osago/calc` - Quote every eligible partner for a session
//!
//! ## Health
//! - `GET /api/v1/health` - Health check endpoint
//!
//! Errors are returned as `{"code": .., "message": ..}` with the status of
//! the underlying [`ApplicationError`](crate::application::ApplicationError).
//!
//! # Usage
//!
//! ```ignore
//! use osago_quotes::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState {
//!     resolver: /* ... */,
//!     orchestrator: /* ... */,
//! });
//!
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, ApiResult, AppState, ErrorResponse, HealthResponse};
pub use routes::{create_router, shutdown_on};
