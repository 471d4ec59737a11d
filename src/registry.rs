//! In-memory Wi-Fi channel registry.
//!
//! The registry is the entire persisted state of the daemon: an ordered
//! sequence of `(band, channel, interference)` records. Insertion order is
//! irrelevant for queries except as the tie-breaker for equal interference.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// The fixed set of bands covered by the aggregate best-channel query.
///
/// Records added under any other band label are never considered by
/// [`ChannelRegistry::best_channels_per_band`], although they remain
/// reachable through the per-band query.
pub const BANDS: [&str; 3] = ["2.4GHz", "5GHz", "6GHz"];

/// A single channel observation.
///
/// No uniqueness is enforced on `(band, channel)`: repeated adds produce
/// duplicate records, and `remove` clears all of them at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Frequency band label (e.g. "2.4GHz", "5GHz", "6GHz").
    pub band: String,
    /// Channel number within the band.
    pub channel: u32,
    /// Interference score; lower is better. Any sign is accepted.
    pub interference: f64,
}

/// Thread-safe registry of channel records.
///
/// Axum handlers run on a multi-threaded runtime, so mutation goes through
/// an `RwLock`. Critical sections are short and never held across an await.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    records: RwLock<Vec<ChannelRecord>>,
}

impl ChannelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Accepts any band label and any interference value.
    pub fn add(&self, band: &str, channel: u32, interference: f64) {
        self.records.write().push(ChannelRecord {
            band: band.to_string(),
            channel,
            interference,
        });
    }

    /// Remove every record matching `(band, channel)` exactly.
    ///
    /// Survivors keep their relative order. Returns the number of records
    /// removed; 0 when nothing matched (not an error, and idempotent).
    pub fn remove(&self, band: &str, channel: u32) -> usize {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.band != band || r.channel != channel);
        before - records.len()
    }

    /// Best (lowest-interference) channel for a band, or `None` when the
    /// band has no records.
    ///
    /// Ties on interference resolve to the first-added record: the scan
    /// uses strict `<`, so a later record only wins by being strictly
    /// better. Accepts arbitrary band strings, not just [`BANDS`].
    pub fn best_channel(&self, band: &str) -> Option<u32> {
        let records = self.records.read();
        let mut best: Option<&ChannelRecord> = None;
        for record in records.iter().filter(|r| r.band == band) {
            match best {
                Some(b) if record.interference < b.interference => best = Some(record),
                Some(_) => {}
                None => best = Some(record),
            }
        }
        best.map(|r| r.channel)
    }

    /// Best channel for each of the three fixed bands.
    ///
    /// The result always carries exactly the keys in [`BANDS`]; bands with
    /// no records map to `None`.
    pub fn best_channels_per_band(&self) -> BTreeMap<&'static str, Option<u32>> {
        BANDS
            .iter()
            .map(|&band| (band, self.best_channel(band)))
            .collect()
    }

    /// Copy of all records, in insertion order.
    pub fn snapshot(&self) -> Vec<ChannelRecord> {
        self.records.read().clone()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
