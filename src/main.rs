//! EchoCold Brain - Compressor Health Intelligence
//!
//! Real-time classification of refrigeration-compressor telemetry from an
//! MQTT broker, with an HTTP API serving annotated history to the dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Run against the configured broker
//! cargo run --release
//!
//! # Replay samples from stdin (JSON per line)
//! python sensor_simulator.py | ./echocold-brain --stdin
//!
//! # Select the factory profile
//! ./echocold-brain --profile R600A_MODERN
//! ```
//!
//! # Environment Variables
//!
//! - `ECHOCOLD_CONFIG`: Path to a TOML config file (default: ./echocold.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use echocold_brain::api::{self, ApiState};
use echocold_brain::config::{self, BrainConfig};
use echocold_brain::ingest::{IngestLoop, MqttSource, SampleSource, StdinSource};
use echocold_brain::storage::SampleStorage;
use echocold_brain::store::DeviceStateStore;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "echocold-brain")]
#[command(about = "EchoCold compressor health intelligence")]
#[command(version)]
struct CliArgs {
    /// Read samples from stdin (JSON per line) instead of the MQTT broker
    #[arg(long)]
    stdin: bool,

    /// Override the HTTP server bind address (default from config)
    #[arg(short, long)]
    addr: Option<String>,

    /// Override the active compressor profile name
    #[arg(long)]
    profile: Option<String>,

    /// Override the sled data directory
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,

    /// Path to a TOML config file (overrides ECHOCOLD_CONFIG)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load config and fold in CLI overrides.
fn load_config(args: &CliArgs) -> Result<BrainConfig> {
    let mut cfg = match &args.config {
        Some(path) => BrainConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path))?,
        None => BrainConfig::load()?,
    };
    if let Some(addr) = &args.addr {
        cfg.server.addr = addr.clone();
    }
    if let Some(profile) = &args.profile {
        cfg.profile = profile.clone();
    }
    if let Some(dir) = &args.data_dir {
        cfg.storage.data_dir = dir.clone();
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    config::init(load_config(&args)?);
    let cfg = config::get();

    // Resolve the active profile before anything else; a bad name is fatal.
    let profile = cfg.resolve_profile()?;
    info!(profile = %cfg.profile, "active compressor profile");

    let storage = SampleStorage::open(&cfg.storage.data_dir)
        .with_context(|| format!("opening sample storage at {}", cfg.storage.data_dir))?;
    let store = Arc::new(DeviceStateStore::new());
    let readings_processed = Arc::new(AtomicU64::new(0));
    let cancel = CancellationToken::new();

    // === Ingestion task ===
    let source: Box<dyn SampleSource> = if args.stdin {
        Box::new(StdinSource::new())
    } else {
        info!(host = %cfg.broker.host, port = cfg.broker.port, "using MQTT ingestion");
        Box::new(MqttSource::new(&cfg.broker))
    };
    let ingest = IngestLoop::new(
        profile,
        Arc::clone(&store),
        storage.clone(),
        Arc::clone(&readings_processed),
    );

    let mut tasks = JoinSet::new();
    {
        let cancel = cancel.clone();
        tasks.spawn(async move { ingest.run(source, cancel).await });
    }

    // === HTTP server task ===
    let api_state = ApiState::new(
        profile,
        cfg.profile.clone(),
        Arc::clone(&store),
        Some(storage.clone()),
        Arc::clone(&readings_processed),
    );
    let app = api::create_app(api_state);
    let listener = tokio::net::TcpListener::bind(&cfg.server.addr)
        .await
        .with_context(|| format!("binding HTTP server to {}", cfg.server.addr))?;
    info!(addr = %cfg.server.addr, "HTTP API listening");

    {
        let cancel = cancel.clone();
        tasks.spawn(async move {
            let shutdown = cancel.clone();
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                cancel.cancel();
            }
        });
    }

    // === Shutdown sequencing ===
    tokio::signal::ctrl_c()
        .await
        .context("listening for shutdown signal")?;
    info!("shutdown signal received");
    cancel.cancel();

    while tasks.join_next().await.is_some() {}

    if let Err(e) = storage.flush() {
        tracing::warn!(error = %e, "final storage flush failed");
    }
    info!("shutdown complete");
    Ok(())
}
