//! spectryd - Wi-Fi spectrum analysis daemon.
//!
//! An HTTP daemon over an in-memory registry of Wi-Fi channel records.
//! The core operation is best-channel selection: the lowest-interference
//! channel per frequency band. Live-capture endpoints (probe-request
//! monitoring, network discovery, deauth detection) sit behind a pluggable
//! [`capture::CaptureProvider`]; the default backend observes nothing.

pub mod capture;
pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod metrics;
pub mod registry;
