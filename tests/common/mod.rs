//! Integration test common infrastructure.
//!
//! Spawns spectryd instances on fixed per-test ports and drives them over
//! HTTP.

pub mod server;

#[allow(unused_imports)]
pub use server::TestServer;
