//! Cache entry status and the snapshots handed to consumers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::key::ResourceKey;

/// Lifecycle status of a cache entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Known key, nothing resolved yet and nothing in flight.
    Idle,
    /// First resolution in flight; no data to show yet.
    Loading,
    /// Data resolved and not yet superseded.
    Fresh,
    /// Data present but superseded (invalidation or TTL); a re-resolve is due
    /// or already running.
    Stale,
    /// The most recent resolution failed. Earlier data, if any, is retained.
    Error,
}

/// Read-only view of a cache entry at one instant.
///
/// Snapshots are values: holding one confers no ability to write cache state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub key: ResourceKey,
    pub status: EntryStatus,
    /// Last known-good data. Retained through failed refreshes.
    pub data: Option<Value>,
    /// Message of the most recent failed resolution, cleared on success.
    pub error: Option<String>,
    pub last_resolved_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Decode the data into a typed view.
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.data
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Last known-good data is on screen but the latest refresh failed.
    ///
    /// Views render this as a non-fatal banner over existing content.
    pub fn is_degraded(&self) -> bool {
        self.data.is_some() && self.error.is_some()
    }

    /// The initial load failed and there is nothing to show.
    pub fn is_unavailable(&self) -> bool {
        self.data.is_none() && self.status == EntryStatus::Error
    }
}
