//! Tally gateway binary entry point.
//!
//! Loads environment configuration, opens the asset store, constructs
//! the provider and both agents, and runs the axum server with
//! graceful shutdown on ctrl-c.

use agents::{AssetManager, DbManager};
use anyhow::{Context, Result};
use llm::{Client, General, HttpProvider, RateLimiter};
use std::sync::Arc;
use store::AssetStore;
use tally_gateway::{AppState, GatewayConfig};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing from RUST_LOG (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration; missing required variables are fatal.
    let config = GatewayConfig::from_env()?;
    tracing::info!("configuration loaded from environment");

    // Open the asset store.
    let store = Arc::new(
        AssetStore::open(&config.db_path)
            .with_context(|| format!("failed to open asset store at {}", config.db_path))?,
    );
    tracing::info!("asset store ready at {}", config.db_path);

    // Construct the provider with the per-credential request budget.
    let limiter = RateLimiter::per_minute(config.requests_per_minute);
    let provider = HttpProvider::bearer(Client::new(), &config.api_key, &config.base_url)?
        .with_limiter(limiter);
    tracing::info!("provider initialized for model {}", config.model);

    // Wire the two-tier agents: the delegate reads the ledger at
    // temperature 0, the manager converses at 0.7.
    let delegate = DbManager::new(
        provider.clone(),
        General::new(config.model.clone()),
        Arc::clone(&store),
    );
    let manager = AssetManager::new(
        provider,
        General::new(config.model.clone()).temperature(0.7),
        delegate,
    );

    let state = AppState {
        store,
        manager: Arc::new(manager),
    };
    let app = tally_gateway::router(state);

    // Bind and serve.
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;
    tracing::info!("gateway listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gateway shut down");
    Ok(())
}

/// Wait for ctrl-c signal for graceful shutdown.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("received shutdown signal");
}
