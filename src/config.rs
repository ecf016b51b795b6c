//! # Configuration
//!
//! Layered application configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults (partner base URLs, timeouts, session TTL)
//! 2. an optional TOML file
//! 3. environment variables prefixed `OSAGO`, nested with `__`,
//!    e.g. `OSAGO__PROVIDERS__NEO__AUTH__PASSWORD`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first, so partner credentials never have to live in the TOML file.
//!
//! # Examples
//!
//! ```no_run
//! use osago_quotes::config::AppConfig;
//!
//! let config = AppConfig::load(None)?;
//! println!("listening on {}", config.server.bind_addr);
//! # Ok::<(), osago_quotes::config::ConfigError>(())
//! ```

use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::auth::AuthScheme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default session lifetime: 30 minutes.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Default session key namespace.
pub const DEFAULT_SESSION_NAMESPACE: &str = "osago";

/// Default partner call timeout.
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 30_000;

const MIN_PROVIDER_TIMEOUT_MS: u64 = 1_000;
const MAX_PROVIDER_TIMEOUT_MS: u64 = 120_000;

const ENV_PREFIX: &str = "OSAGO";

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// Values were read but are not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Session store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Process-local store; sessions die with the process.
    #[default]
    Memory,
    /// Redis.
    Redis,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

/// Session store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Backend.
    #[serde(default)]
    pub backend: SessionBackend,
    /// Redis connection URL, required for the redis backend.
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Key namespace.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_namespace() -> String {
    DEFAULT_SESSION_NAMESPACE.to_string()
}

fn default_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            redis_url: None,
            namespace: default_namespace(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Identity registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Provider whose API serves registry lookups.
    #[serde(default = "default_registry_provider")]
    pub provider: ProviderName,
    /// Vehicle lookup path.
    #[serde(default = "default_vehicle_path")]
    pub vehicle_path: String,
    /// Person lookup path.
    #[serde(default = "default_person_path")]
    pub person_path: String,
}

fn default_registry_provider() -> ProviderName {
    ProviderName::Neo
}

fn default_vehicle_path() -> String {
    "/api/provider/vehicle".to_string()
}

fn default_person_path() -> String {
    "/api/provider/person".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            provider: default_registry_provider(),
            vehicle_path: default_vehicle_path(),
            person_path: default_person_path(),
        }
    }
}

/// One partner endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Authentication scheme.
    #[serde(default)]
    pub auth: AuthScheme,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_MS
}

impl ProviderConfig {
    /// Creates an endpoint with the default timeout and no authentication.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
            auth: AuthScheme::None,
        }
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the authentication scheme.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }
}

/// All partner endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// NEO.
    pub neo: ProviderConfig,
    /// GROSS.
    pub gross: ProviderConfig,
    /// EUROASIA.
    pub euroasia: ProviderConfig,
    /// APEX.
    pub apex: ProviderConfig,
    /// TRUST.
    pub trust: ProviderConfig,
}

impl ProvidersConfig {
    /// Returns the endpoint of a provider.
    #[must_use]
    pub fn get(&self, provider: ProviderName) -> &ProviderConfig {
        match provider {
            ProviderName::Neo => &self.neo,
            ProviderName::Gross => &self.gross,
            ProviderName::Euroasia => &self.euroasia,
            ProviderName::Apex => &self.apex,
            ProviderName::Trust => &self.trust,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Session store.
    #[serde(default)]
    pub session: SessionConfig,
    /// Identity registry.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Partner endpoints.
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads configuration from defaults, an optional file and the
    /// environment, then validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source cannot be read or does not
    /// deserialize, `ConfigError::Invalid` if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();

        let mut builder = ::config::Config::builder();
        for (provider, base_url) in default_base_urls() {
            builder = builder
                .set_default(format!("providers.{}.base_url", provider), base_url)?
                .set_default(
                    format!("providers.{}.timeout_ms", provider),
                    DEFAULT_PROVIDER_TIMEOUT_MS as i64,
                )?;
        }
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for provider in ProviderName::ALL {
            let endpoint = self.providers.get(provider);
            if endpoint.base_url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "providers.{}.base_url is empty",
                    provider
                )));
            }
            if !(MIN_PROVIDER_TIMEOUT_MS..=MAX_PROVIDER_TIMEOUT_MS).contains(&endpoint.timeout_ms)
            {
                return Err(ConfigError::Invalid(format!(
                    "providers.{}.timeout_ms must be within {}..={}, got {}",
                    provider, MIN_PROVIDER_TIMEOUT_MS, MAX_PROVIDER_TIMEOUT_MS, endpoint.timeout_ms
                )));
            }
        }
        if self.session.ttl_secs == 0 {
            return Err(ConfigError::Invalid("session.ttl_secs must be positive".into()));
        }
        if self.session.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid("session.namespace is empty".into()));
        }
        if self.session.backend == SessionBackend::Redis && self.session.redis_url.is_none() {
            return Err(ConfigError::Invalid(
                "session.redis_url is required for the redis backend".into(),
            ));
        }
        Ok(())
    }
}

fn default_base_urls() -> [(ProviderName, &'static str); 5] {
    [
        (ProviderName::Neo, "https://api.neoinsurance.uz"),
        (ProviderName::Gross, "https://api.gross.uz"),
        (ProviderName::Euroasia, "https://api.euroasia-insurance.uz"),
        (ProviderName::Apex, "https://api.apexinsurance.uz"),
        (ProviderName::Trust, "https://api.trustinsurance.uz"),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let endpoint = ProviderConfig::new("https://partner.example");
        AppConfig {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            session: SessionConfig::default(),
            registry: RegistryConfig::default(),
            providers: ProvidersConfig {
                neo: endpoint.clone(),
                gross: endpoint.clone(),
                euroasia: endpoint.clone(),
                apex: endpoint.clone(),
                trust: endpoint,
            },
        }
    }

    #[test]
    fn defaults_are_sensible() {
        let session = SessionConfig::default();
        assert_eq!(session.ttl_secs, 1_800);
        assert_eq!(session.namespace, "osago");
        assert_eq!(RegistryConfig::default().provider, ProviderName::Neo);
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_timeout() {
        let mut config = valid_config();
        config.providers.apex.timeout_ms = 500_000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("providers.apex.timeout_ms"));
    }

    #[test]
    fn rejects_empty_base_url() {
        let mut config = valid_config();
        config.providers.trust.base_url = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn redis_backend_needs_url() {
        let mut config = valid_config();
        config.session.backend = SessionBackend::Redis;
        assert!(config.validate().is_err());
        config.session.redis_url = Some("redis://127.0.0.1/".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserializes_from_toml_shape() {
        let built = ::config::Config::builder()
            .add_source(::config::File::from_str(
                r#"
                [session]
                backend = "redis"
                redis_url = "redis://cache:6379/"

                [providers.neo]
                base_url = "https://neo.test"
                auth = { scheme = "basic", login = "agg", password = "pw" }

                [providers.gross]
                base_url = "https://gross.test"
                timeout_ms = 45000
                auth = { scheme = "api_key", header = "X-Gross-Key", key = "k" }

                [providers.euroasia]
                base_url = "https://euroasia.test"
                auth = { scheme = "issued_token", login_path = "/auth/login", login = "agg", password = "pw" }

                [providers.apex]
                base_url = "https://apex.test"

                [providers.trust]
                base_url = "https://trust.test"
                timeout_ms = 60000
                "#,
                ::config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = built.try_deserialize().unwrap();
        assert_eq!(config.session.backend, SessionBackend::Redis);
        assert_eq!(config.providers.gross.timeout_ms, 45_000);
        assert_eq!(config.providers.apex.timeout_ms, DEFAULT_PROVIDER_TIMEOUT_MS);
        assert_eq!(config.providers.neo.auth.name(), "basic");
        assert_eq!(config.providers.euroasia.auth.name(), "issued_token");
        assert!(config.validate().is_ok());
    }
}
