//! # Providers
//!
//! Adapters for the partner insurers.
//!
//! - [`traits`] and [`http_client`]: the transport port and its reqwest
//!   implementation
//! - [`auth`]: authentication schemes and the issued-token cache
//! - [`neo`], [`gross`], [`euroasia`], [`apex`], [`trust`]: per-partner
//!   request builders and typed responses
//! - [`response`]: the tagged union over those responses
//! - [`registry`]: vehicle and person lookups

pub mod amount;
pub mod apex;
pub mod auth;
pub mod error;
pub mod euroasia;
pub mod gross;
pub mod http_client;
pub mod neo;
pub mod registry;
pub mod response;
pub mod traits;
pub mod trust;

pub use auth::{AuthScheme, TokenCache};
pub use error::{ProviderError, ProviderResult};
pub use http_client::HttpProviderClient;
pub use registry::{HttpIdentityRegistry, IdentityRegistry, PersonQuery, VehicleQuery};
pub use response::ProviderResponse;
pub use traits::{ProviderClient, ProviderReply, ProviderRequest};

use crate::domain::entities::{CalcContext, CalcParams};
use crate::domain::errors::MappingUnsupported;
use crate::domain::value_objects::ProviderName;

/// Builds the calculation request for a provider.
///
/// # Errors
///
/// Returns `MappingUnsupported` when the provider has no code for one of the
/// normalized inputs.
pub fn build_request(
    provider: ProviderName,
    ctx: &CalcContext,
    params: &CalcParams,
) -> Result<ProviderRequest, MappingUnsupported> {
    match provider {
        ProviderName::Neo => neo::build_request(ctx, params),
        ProviderName::Gross => gross::build_request(ctx, params),
        ProviderName::Euroasia => euroasia::build_request(ctx, params),
        ProviderName::Apex => apex::build_request(ctx, params),
        ProviderName::Trust => trust::build_request(ctx, params),
    }
}
