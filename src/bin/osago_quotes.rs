//! `osago-quotes` server binary.
//!
//! Loads configuration, wires the partner clients, the registry and the
//! session store into the two use cases, and serves the REST API.

use anyhow::{Context, Result};
use clap::Parser;
use osago_quotes::api::rest::{AppState, create_router, shutdown_on};
use osago_quotes::application::use_cases::{IdentityResolver, ProviderClients, QuoteOrchestrator};
use osago_quotes::config::{AppConfig, SessionBackend, SessionConfig};
use osago_quotes::domain::value_objects::ProviderName;
use osago_quotes::infrastructure::providers::{HttpIdentityRegistry, HttpProviderClient, TokenCache};
use osago_quotes::infrastructure::session::{
    DEFAULT_SWEEP_INTERVAL, InMemorySessionStore, RedisSessionStore, SessionStore,
};
use osago_quotes::telemetry::init_tracing;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// OSAGO quote aggregation server
#[derive(Parser, Debug)]
#[command(name = "osago-quotes", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, short, env = "OSAGO_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides `server.bind_addr`
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        AppConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    init_tracing(&config.logging).context("failed to initialise tracing")?;

    let tokens = Arc::new(TokenCache::new());
    let mut clients = ProviderClients::new();
    for provider in ProviderName::ALL {
        let endpoint = config.providers.get(provider);
        let client = HttpProviderClient::new(provider, endpoint, tokens.clone())
            .with_context(|| format!("failed to build {provider} client"))?;
        clients.insert(provider, Arc::new(client));
    }

    let registry_client = clients
        .get(&config.registry.provider)
        .cloned()
        .context("registry provider has no client")?;
    let registry = Arc::new(HttpIdentityRegistry::new(registry_client, &config.registry));
    let sessions = session_store(&config.session).await?;

    let state = AppState {
        resolver: IdentityResolver::new(registry, sessions.clone(), &config.session),
        orchestrator: QuoteOrchestrator::new(clients, sessions, config.session.namespace.clone()),
    };
    let router = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    info!(
        addr = %config.server.bind_addr,
        registry = %config.registry.provider,
        session_backend = ?config.session.backend,
        "osago-quotes listening"
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await
        .context("server error")?;
    Ok(())
}

async fn session_store(config: &SessionConfig) -> Result<Arc<dyn SessionStore>> {
    match config.backend {
        SessionBackend::Memory => {
            let store = InMemorySessionStore::new();
            store.spawn_sweeper(DEFAULT_SWEEP_INTERVAL);
            Ok(Arc::new(store))
        }
        SessionBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("session.redis_url is required for the redis backend")?;
            let store = RedisSessionStore::connect(url)
                .await
                .context("failed to connect to redis")?;
            Ok(Arc::new(store))
        }
    }
}
