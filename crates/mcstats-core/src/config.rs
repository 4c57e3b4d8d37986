//! Configuration loading and typed config structures for mcstats.
//!
//! The deployment configuration lives in `mcstats-config.yaml`. Every
//! field has a default matching the stock container layout, so an empty
//! (or missing) file yields a working setup. Environment variables
//! override the YAML values after parsing.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value of the wrong type.
    #[error("invalid value for {var}: {message}")]
    Env {
        /// Name of the offending variable.
        var: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level application configuration.
///
/// Mirrors the structure of `mcstats-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Locations of the on-disk snapshots.
    #[serde(default)]
    pub data: DataConfig,

    /// Game server status probe target.
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment overrides are applied after parsing; see
    /// [`AppConfig::apply_overrides`] for the variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if an override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Env`] if an override is malformed.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Override fields from a variable lookup (normally the process
    /// environment).
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `API_HOST` | `api.host` |
    /// | `API_PORT` | `api.port` |
    /// | `USERCACHE_PATH` | `data.roster_path` |
    /// | `STATS_DIR` | `data.stats_dir` |
    /// | `ADVANCEMENTS_DIR` | `data.advancements_dir` |
    /// | `MC_SERVER_ADDRESS` | `probe.address` |
    /// | `MC_SERVER_PORT` | `probe.port` |
    /// | `MC_STATUS_TIMEOUT_MS` | `probe.timeout_ms` |
    /// | `MC_SERVER_SRV` | `probe.enable_srv` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if a numeric variable does not parse.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("API_HOST") {
            self.api.host = val;
        }
        if let Some(val) = lookup("API_PORT") {
            self.api.port = parse_var("API_PORT", &val)?;
        }
        if let Some(val) = lookup("USERCACHE_PATH") {
            self.data.roster_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("STATS_DIR") {
            self.data.stats_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("ADVANCEMENTS_DIR") {
            self.data.advancements_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup("MC_SERVER_ADDRESS") {
            self.probe.address = val;
        }
        if let Some(val) = lookup("MC_SERVER_PORT") {
            self.probe.port = parse_var("MC_SERVER_PORT", &val)?;
        }
        if let Some(val) = lookup("MC_STATUS_TIMEOUT_MS") {
            self.probe.timeout_ms = parse_var("MC_STATUS_TIMEOUT_MS", &val)?;
        }
        if let Some(val) = lookup("MC_SERVER_SRV") {
            self.probe.enable_srv = parse_var("MC_SERVER_SRV", &val)?;
        }
        Ok(())
    }
}

fn parse_var<T>(var: &'static str, val: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    val.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        var,
        message: format!("{val:?}: {e}"),
    })
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to.
    #[serde(default = "default_api_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

/// Snapshot locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// The server's `usercache.json`.
    #[serde(default = "default_roster_path")]
    pub roster_path: PathBuf,

    /// Directory holding `<uuid>.json` statistics snapshots.
    #[serde(default = "default_stats_dir")]
    pub stats_dir: PathBuf,

    /// Directory holding `<uuid>.json` advancement snapshots.
    #[serde(default = "default_advancements_dir")]
    pub advancements_dir: PathBuf,

    /// Omit players whose snapshot is unreadable instead of failing the
    /// whole `/players` response.
    #[serde(default)]
    pub skip_malformed_records: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            roster_path: default_roster_path(),
            stats_dir: default_stats_dir(),
            advancements_dir: default_advancements_dir(),
            skip_malformed_records: false,
        }
    }
}

/// Status probe target and limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProbeConfig {
    /// Game server hostname or IP address.
    #[serde(default = "default_probe_address")]
    pub address: String,

    /// Game server port.
    #[serde(default = "default_probe_port")]
    pub port: u16,

    /// Upper bound for the whole status exchange, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,

    /// `maxPlayers` reported while the server is unreachable.
    #[serde(default = "default_fallback_max_players")]
    pub fallback_max_players: u32,

    /// Resolve the `_minecraft._tcp` SRV record of `address` first.
    #[serde(default = "default_enable_srv")]
    pub enable_srv: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            address: default_probe_address(),
            port: default_probe_port(),
            timeout_ms: default_probe_timeout_ms(),
            fallback_max_players: default_fallback_max_players(),
            enable_srv: default_enable_srv(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_api_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_api_port() -> u16 {
    3000
}

fn default_roster_path() -> PathBuf {
    PathBuf::from("/usercache.json")
}

fn default_stats_dir() -> PathBuf {
    PathBuf::from("/mcstats")
}

fn default_advancements_dir() -> PathBuf {
    PathBuf::from("/mcadvancements")
}

fn default_probe_address() -> String {
    "mc".to_owned()
}

const fn default_probe_port() -> u16 {
    25565
}

const fn default_probe_timeout_ms() -> u64 {
    5_000
}

const fn default_fallback_max_players() -> u32 {
    40
}

const fn default_enable_srv() -> bool {
    true
}
