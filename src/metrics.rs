//! Prometheus metrics collection for spectryd.
//!
//! Exposed on a separate HTTP port for scraping. Tracks registry mutations,
//! query volume, and API errors.

use prometheus::{
    Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Total channel records added.
pub static CHANNELS_ADDED: OnceLock<IntCounter> = OnceLock::new();

/// Total channel records removed.
pub static CHANNELS_REMOVED: OnceLock<IntCounter> = OnceLock::new();

/// Total best-channel queries (per-band and aggregate).
pub static BEST_CHANNEL_QUERIES: OnceLock<IntCounter> = OnceLock::new();

/// Current registry size.
pub static REGISTRY_SIZE: OnceLock<IntGauge> = OnceLock::new();

/// HTTP requests by path.
pub static HTTP_REQUESTS: OnceLock<IntCounterVec> = OnceLock::new();

/// API errors by error code.
pub static API_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Must be called once at server startup before any metrics are recorded.
pub fn init() {
    let r = registry();

    // Helper macro to register metric
    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(CHANNELS_ADDED, IntCounter::new("spectryd_channels_added_total", "Channel records added"));
    register!(CHANNELS_REMOVED, IntCounter::new("spectryd_channels_removed_total", "Channel records removed"));
    register!(BEST_CHANNEL_QUERIES, IntCounter::new("spectryd_best_channel_queries_total", "Best-channel queries served"));
    register!(REGISTRY_SIZE, IntGauge::new("spectryd_registry_size", "Current channel record count"));
    register!(HTTP_REQUESTS, IntCounterVec::new(Opts::new("spectryd_http_requests_total", "HTTP requests by path"), &["path"]));
    register!(API_ERRORS, IntCounterVec::new(Opts::new("spectryd_api_errors_total", "API errors by code"), &["code"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// Increment helpers. All are no-ops before `init()` so code paths exercised
// in unit tests (which never start the metrics server) stay silent.

pub fn inc_channels_added() {
    if let Some(c) = CHANNELS_ADDED.get() {
        c.inc();
    }
}

pub fn inc_channels_removed(n: usize) {
    if let Some(c) = CHANNELS_REMOVED.get() {
        c.inc_by(n as u64);
    }
}

pub fn inc_best_channel_queries() {
    if let Some(c) = BEST_CHANNEL_QUERIES.get() {
        c.inc();
    }
}

pub fn set_registry_size(n: usize) {
    if let Some(g) = REGISTRY_SIZE.get() {
        g.set(n as i64);
    }
}

pub fn inc_http_request(path: &str) {
    if let Some(c) = HTTP_REQUESTS.get() {
        c.with_label_values(&[path]).inc();
    }
}

pub fn inc_api_error(code: &str) {
    if let Some(c) = API_ERRORS.get() {
        c.with_label_values(&[code]).inc();
    }
}
