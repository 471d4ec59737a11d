//! Packet capture provider abstraction.
//!
//! The registry never depends on capture: providers are an external
//! collaborator behind this trait, and the daemon ships functional with the
//! no-op backend. A platform adapter (monitor-mode driver, raw sockets) can
//! satisfy the trait later without touching registry logic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod noop;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture not supported by backend '{0}'")]
    Unsupported(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a deauthentication-frame scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeauthReport {
    /// Whether any deauth frames were observed in the capture window.
    pub detected: bool,
    /// Number of deauth frames observed.
    pub count: usize,
}

impl DeauthReport {
    /// Report for a window in which nothing was observed.
    pub fn clear() -> Self {
        Self {
            detected: false,
            count: 0,
        }
    }
}

/// A source of live 802.11 management-frame observations.
#[async_trait]
pub trait CaptureProvider: Send + Sync {
    /// Backend name for logs and the analysis report.
    fn name(&self) -> &'static str;

    /// Capture probe requests and return the source MACs of nearby devices.
    async fn monitor_packets(&self) -> Result<Vec<String>, CaptureError>;

    /// Capture beacon frames and return a BSSID -> SSID map of nearby
    /// networks.
    async fn detect_networks(&self) -> Result<BTreeMap<String, String>, CaptureError>;

    /// Scan for deauthentication frames, indicative of a deauth attack.
    async fn detect_deauth(&self) -> Result<DeauthReport, CaptureError>;
}
