//! No-op capture provider that observes nothing.
//!
//! Used when no capture backend is configured or available. All scans
//! succeed and report empty airspace.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{CaptureError, CaptureProvider, DeauthReport};

pub struct NoOpProvider;

#[async_trait]
impl CaptureProvider for NoOpProvider {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn monitor_packets(&self) -> Result<Vec<String>, CaptureError> {
        Ok(vec![])
    }

    async fn detect_networks(&self) -> Result<BTreeMap<String, String>, CaptureError> {
        Ok(BTreeMap::new())
    }

    async fn detect_deauth(&self) -> Result<DeauthReport, CaptureError> {
        Ok(DeauthReport::clear())
    }
}
