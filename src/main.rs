//! spectryd daemon entry point.

use std::sync::Arc;

use spectryd::capture::CaptureProvider;
use spectryd::capture::noop::NoOpProvider;
use spectryd::config::Config;
use spectryd::history::ActionLog;
use spectryd::http::{self, AppState};
use spectryd::metrics;
use spectryd::registry::ChannelRegistry;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).map_err(|e| {
            error!(path = %config_path, error = %e, "Failed to load config");
            e
        })?
    } else {
        warn!(path = %config_path, "Config file not found, using built-in defaults");
        Config::default()
    };

    info!(
        server = %config.server.name,
        listen = %config.server.listen,
        "Starting spectryd"
    );

    // Capture provider selection. Only the no-op backend ships with the
    // daemon; unknown backend names fall back to it with a warning.
    let capture: Arc<dyn CaptureProvider> = match config.capture.backend.as_str() {
        "none" => Arc::new(NoOpProvider),
        other => {
            warn!(backend = %other, "Unknown capture backend. Using no-op.");
            Arc::new(NoOpProvider)
        }
    };
    info!(
        backend = capture.name(),
        interface = %config.capture.interface,
        timeout_secs = config.capture.timeout_secs,
        "Capture provider initialized"
    );

    let state = AppState {
        registry: Arc::new(ChannelRegistry::new()),
        capture,
        journal: Arc::new(ActionLog::new(
            config.history.enabled,
            config.history.capacity,
        )),
    };

    // Prometheus metrics are optional.
    // Convention: metrics_port = 0 disables the HTTP endpoint (used by tests).
    let metrics_port = config.server.metrics_port.unwrap_or(9090);
    if metrics_port == 0 {
        info!("Metrics disabled");
    } else {
        metrics::init();
        info!("Metrics initialized");

        tokio::spawn(async move {
            http::run_metrics_server(metrics_port).await;
        });
        info!(port = metrics_port, "Prometheus HTTP server started");
    }

    http::run_api_server(config.server.listen, state).await
}
