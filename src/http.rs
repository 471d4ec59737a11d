//! HTTP API for the channel registry and capture endpoints.
//!
//! All request and response bodies are JSON. Well-formed requests return
//! 200; malformed bodies (missing field, wrong type, not JSON) are rejected
//! with 400 and an `InvalidInput` payload instead of being accepted blindly.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::capture::{CaptureProvider, DeauthReport};
use crate::error::{ApiError, ApiResult};
use crate::history::{ActionEntry, ActionLog};
use crate::metrics;
use crate::registry::{ChannelRecord, ChannelRegistry};

/// Shared state handed to every handler.
///
/// The registry is an explicitly owned instance rather than process-wide
/// state, so tests can build a fresh one per server.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ChannelRegistry>,
    pub capture: Arc<dyn CaptureProvider>,
    pub journal: Arc<ActionLog>,
}

/// Body for `POST /addChannel`.
#[derive(Debug, Deserialize)]
pub struct AddChannelRequest {
    pub band: String,
    pub channel: u32,
    pub interference: f64,
}

/// Body for `DELETE /removeChannel`.
#[derive(Debug, Deserialize)]
pub struct RemoveChannelRequest {
    pub band: String,
    pub channel: u32,
}

/// Acknowledgement for mutating endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

/// Composite report for `GET /generalNetworkAnalysis`: the aggregate
/// best-channel query bundled with the three capture results.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub best_channels: BTreeMap<&'static str, Option<u32>>,
    pub nearby_devices: Vec<String>,
    pub networks: BTreeMap<String, String>,
    pub deauth: DeauthReport,
    pub capture_backend: &'static str,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/bestChannels", get(best_channels))
        .route("/addChannel", post(add_channel))
        .route("/removeChannel", delete(remove_channel))
        .route("/channels", get(list_channels))
        .route("/history", get(history))
        .route("/monitorNetworkPackets", get(monitor_network_packets))
        .route("/detectNearbyNetworks", get(detect_nearby_networks))
        .route("/detectDeauth", get(detect_deauth))
        .route("/generalNetworkAnalysis", get(general_network_analysis))
        .with_state(state)
}

/// Handler for GET /bestChannels - best channel per fixed band.
async fn best_channels(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, Option<u32>>> {
    metrics::inc_http_request("/bestChannels");
    metrics::inc_best_channel_queries();
    Json(state.registry.best_channels_per_band())
}

/// Handler for POST /addChannel - append a channel record.
async fn add_channel(
    State(state): State<AppState>,
    body: Result<Json<AddChannelRequest>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    metrics::inc_http_request("/addChannel");
    let Json(req) = body.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    state.registry.add(&req.band, req.channel, req.interference);
    metrics::inc_channels_added();
    metrics::set_registry_size(state.registry.len());

    let message = format!("Added channel {} on {}", req.channel, req.band);
    state.journal.record(&message);
    tracing::info!(
        band = %req.band,
        channel = req.channel,
        interference = req.interference,
        "Channel added"
    );

    Ok(Json(StatusResponse {
        success: true,
        message,
    }))
}

/// Handler for DELETE /removeChannel - remove all matching records.
///
/// Removing a channel that does not exist is a no-op, not an error.
async fn remove_channel(
    State(state): State<AppState>,
    body: Result<Json<RemoveChannelRequest>, JsonRejection>,
) -> ApiResult<Json<StatusResponse>> {
    metrics::inc_http_request("/removeChannel");
    let Json(req) = body.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let removed = state.registry.remove(&req.band, req.channel);
    metrics::inc_channels_removed(removed);
    metrics::set_registry_size(state.registry.len());

    let message = format!(
        "Removed {} record(s) for channel {} on {}",
        removed, req.channel, req.band
    );
    if removed > 0 {
        state
            .journal
            .record(format!("Removed channel {} on {}", req.channel, req.band));
    }
    tracing::info!(band = %req.band, channel = req.channel, removed, "Channel removed");

    Ok(Json(StatusResponse {
        success: true,
        message,
    }))
}

/// Handler for GET /channels - all records in insertion order.
async fn list_channels(State(state): State<AppState>) -> Json<Vec<ChannelRecord>> {
    metrics::inc_http_request("/channels");
    Json(state.registry.snapshot())
}

/// Handler for GET /history - journaled actions, oldest first.
async fn history(State(state): State<AppState>) -> Json<Vec<ActionEntry>> {
    metrics::inc_http_request("/history");
    Json(state.journal.entries())
}

/// Handler for GET /monitorNetworkPackets - probe-request source MACs.
async fn monitor_network_packets(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<String>>> {
    metrics::inc_http_request("/monitorNetworkPackets");
    Ok(Json(state.capture.monitor_packets().await?))
}

/// Handler for GET /detectNearbyNetworks - BSSID -> SSID map.
async fn detect_nearby_networks(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<String, String>>> {
    metrics::inc_http_request("/detectNearbyNetworks");
    Ok(Json(state.capture.detect_networks().await?))
}

/// Handler for GET /detectDeauth - deauthentication-attack scan.
async fn detect_deauth(State(state): State<AppState>) -> ApiResult<Json<DeauthReport>> {
    metrics::inc_http_request("/detectDeauth");
    Ok(Json(state.capture.detect_deauth().await?))
}

/// Handler for GET /generalNetworkAnalysis - composite report.
async fn general_network_analysis(
    State(state): State<AppState>,
) -> ApiResult<Json<AnalysisReport>> {
    metrics::inc_http_request("/generalNetworkAnalysis");
    metrics::inc_best_channel_queries();
    Ok(Json(AnalysisReport {
        best_channels: state.registry.best_channels_per_band(),
        nearby_devices: state.capture.monitor_packets().await?,
        networks: state.capture.detect_networks().await?,
        deauth: state.capture.detect_deauth().await?,
        capture_backend: state.capture.name(),
    }))
}

/// Run the HTTP API server. This is the daemon's main serve loop.
pub async fn run_api_server(listen: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    tracing::info!("HTTP API listening on {}", listen);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Handler for GET /metrics - returns Prometheus metrics in text format.
async fn metrics_handler() -> String {
    metrics::gather_metrics()
}

/// Run the HTTP server for Prometheus metrics.
///
/// Binds to `0.0.0.0:port` and serves the `/metrics` endpoint.
/// This is a long-running task that should be spawned in the background.
pub async fn run_metrics_server(port: u16) {
    let app = Router::new().route("/metrics", get(metrics_handler));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Prometheus HTTP server listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind HTTP server on {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("HTTP server error: {}", e);
    }
}
