//! # Eth Sonifier Runtime
//!
//! Process entry point: initialize logging, load configuration, check node
//! connectivity, then run the poll-map-emit loop until interrupted.
//!
//! ## Usage
//!
//! ```bash
//! # Poll a local node, send OSC to SuperCollider on the default port
//! sonifier-runtime
//!
//! # Point at a hosted endpoint
//! SONIFIER_RPC_URL=https://mainnet.infura.io/v3/<project-id> sonifier-runtime
//! ```
//!
//! Configuration is fixed at startup; there are no CLI flags and nothing is
//! persisted. If the initial connectivity check fails the process reports
//! the failure and exits cleanly without entering the poll loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use sonifier_core::domain::wei_to_eth;
use sonifier_core::ports::ChainRpc;
use sonifier_core::{BlockPoller, Emitter, HttpChainRpc, OscSink, SonifierConfig};

/// Load configuration from defaults and environment overrides.
fn load_config() -> SonifierConfig {
    let mut config = SonifierConfig::default();

    if let Ok(url) = std::env::var("SONIFIER_RPC_URL") {
        config.rpc_url = url;
    }
    if let Ok(host) = std::env::var("SONIFIER_OSC_HOST") {
        config.osc_host = host;
    }
    if let Ok(port) = std::env::var("SONIFIER_OSC_PORT") {
        if let Ok(p) = port.parse() {
            config.osc_port = p;
        }
    }
    if let Ok(secs) = std::env::var("SONIFIER_POLL_INTERVAL_SECS") {
        if let Ok(s) = secs.parse() {
            config.poll_interval_secs = s;
        }
    }

    config
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config();

    info!("Connecting to Ethereum node at {}", config.rpc_url);
    let rpc = Arc::new(HttpChainRpc::new(config.rpc_url.clone()));

    // Connectivity check doubles as the starting cursor: blocks at or below
    // this height are never played.
    let latest = match rpc.current_height().await {
        Ok(height) => height,
        Err(e) => {
            error!("Failed to connect to Ethereum node at {}: {}", config.rpc_url, e);
            error!("Check the endpoint URL and your network connection");
            return Ok(());
        }
    };

    info!("Connected to Ethereum! Latest block: {}", latest);
    info!(
        "Sending OSC messages to {}:{}",
        config.osc_host, config.osc_port
    );
    info!(
        "Minimum transaction value threshold: {} ETH",
        wei_to_eth(config.min_value_threshold)
    );

    let sink = Arc::new(
        OscSink::connect(&config.osc_host, config.osc_port)
            .context("Failed to open OSC socket")?,
    );
    let emitter = Emitter::new(sink, config.pacing());
    let mut poller = BlockPoller::new(config, rpc, emitter, latest);

    tokio::select! {
        _ = poller.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
