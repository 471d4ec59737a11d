//! Configuration loading and management.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Daemon configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server identity and listen configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Packet capture backend configuration.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Action journal configuration.
    #[serde(default)]
    pub history: HistoryConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used in log output.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Address the HTTP API binds to.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Prometheus metrics HTTP port (default: 9090). 0 disables the
    /// endpoint (used by tests).
    pub metrics_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            listen: default_listen(),
            metrics_port: None,
        }
    }
}

fn default_server_name() -> String {
    "spectryd".to_string()
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8421))
}

/// Packet capture backend configuration.
///
/// The interface and timeout are forwarded to whichever backend is
/// selected; the built-in "none" backend ignores them but keeps the knobs
/// so a monitor-mode backend can be dropped in without a config migration.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    /// Backend name. Only "none" ships with the daemon.
    #[serde(default = "default_capture_backend")]
    pub backend: String,
    /// Wireless interface to sniff on (default: "wlan0").
    #[serde(default = "default_interface")]
    pub interface: String,
    /// Capture window per request, in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            backend: default_capture_backend(),
            interface: default_interface(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_capture_backend() -> String {
    "none".to_string()
}

fn default_interface() -> String {
    "wlan0".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Action journal configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Whether add/remove actions are journaled (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum retained entries; oldest are dropped first (default: 1024).
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_history_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_capacity() -> usize {
    1024
}
