//! mcstats binary.
//!
//! Serves per-player statistics read from a Minecraft server's data files
//! together with a live status probe of the server itself.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `mcstats-config.yaml` (or `$MCSTATS_CONFIG`)
//! 3. Build the shared application state
//! 4. Serve HTTP until a shutdown signal arrives

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use mcstats_api::{AppState, ServerConfig, start_server};
use mcstats_core::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServerBinError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "mcstats-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the HTTP server
/// cannot bind or fails while serving.
#[tokio::main]
async fn main() -> Result<(), ServerBinError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("mcstats-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        roster = %config.data.roster_path.display(),
        stats_dir = %config.data.stats_dir.display(),
        advancements_dir = %config.data.advancements_dir.display(),
        skip_malformed_records = config.data.skip_malformed_records,
        mc_address = config.probe.address,
        mc_port = config.probe.port,
        probe_timeout_ms = config.probe.timeout_ms,
        "Configuration loaded"
    );

    // 3. Build shared state.
    let state = Arc::new(AppState::new(&config));
    let server_config = ServerConfig::from(&config.api);

    // 4. Serve.
    start_server(&server_config, state).await?;

    info!("mcstats-server exiting");
    Ok(())
}

/// Load configuration from `$MCSTATS_CONFIG` or `mcstats-config.yaml`.
///
/// If the file does not exist, defaults are used. Environment overrides
/// apply in both cases.
fn load_config() -> Result<AppConfig, ServerBinError> {
    let config_path = std::env::var("MCSTATS_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if config_path.exists() {
        info!(path = %config_path.display(), "Reading config file");
        Ok(AppConfig::from_file(&config_path)?)
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        let mut config = AppConfig::default();
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }
}
