//! Subtrack Server
//!
//! Run with: cargo run --bin subtrack
//!
//! Serves the dashboard at `/` and the JSON API under `/api/v1`.
//! Configuration comes from `--config`, the default config locations, or
//! `SUBTRACK_*` environment variables. `RUST_LOG` overrides the log level.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use subtrack::api::{serve, AppState};
use subtrack::config::{Config, LoggingConfig};
use subtrack::store::SubscriptionStore;
use subtrack::websocket::HubConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "subtrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Subscription dashboard server")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Start with an empty list instead of the example subscriptions
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default(),
    };

    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if args.no_seed {
        config.store.seed_defaults = false;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting Subtrack v{}", env!("CARGO_PKG_VERSION"));

    let store = if config.store.seed_defaults {
        SubscriptionStore::with_defaults()
    } else {
        SubscriptionStore::new()
    };
    tracing::info!(
        subscriptions = store.len(),
        seeded = config.store.seed_defaults,
        "Subscription store ready"
    );

    let hub_config = HubConfig {
        max_connections: config.api.max_ws_connections,
    };
    let state = AppState::with_ws_config(store, config.dashboard.clone(), hub_config);

    serve(state, &config.api).await?;

    tracing::info!("Subtrack stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("subtrack={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
