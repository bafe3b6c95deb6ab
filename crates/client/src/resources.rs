//! Well-known resource keys and freshness policies.
//!
//! Screens must take their keys from here. Two spellings of the same logical
//! query would land on different cache entries and silently split the cache,
//! so the key vocabulary lives in exactly one place.

use std::time::Duration;

use lanhall_cache::{FreshnessPolicy, KeySelector, ResourceKey};

/// Near-real-time views (running sessions, backend health) refresh on this
/// interval.
pub const LIVE_POLL_INTERVAL: Duration = Duration::from_secs(30);

pub fn machines() -> ResourceKey {
    ResourceKey::new("machines")
}

pub fn bookings() -> ResourceKey {
    ResourceKey::new("bookings")
}

pub fn sessions() -> ResourceKey {
    ResourceKey::new("sessions")
}

pub fn payments() -> ResourceKey {
    ResourceKey::new("payments")
}

pub fn users() -> ResourceKey {
    ResourceKey::new("users")
}

/// The signed-in principal's own profile and balance.
pub fn profile() -> ResourceKey {
    ResourceKey::new("profile")
}

pub fn health() -> ResourceKey {
    ResourceKey::new("health")
}

/// Audit log, optionally filtered; each filter combination is its own cache
/// entry within the `audit-logs` family.
pub fn audit_logs(user_id: Option<i64>, action: Option<&str>) -> ResourceKey {
    let mut key = ResourceKey::new("audit-logs");
    if let Some(user_id) = user_id {
        key = key.with_param("user_id", user_id);
    }
    if let Some(action) = action {
        key = key.with_param("action", action);
    }
    key
}

/// Selector for every filtered variant of the audit log.
pub fn audit_logs_family() -> KeySelector {
    KeySelector::family("audit-logs")
}

/// Freshness policy for a key: live views poll, everything else stays fresh
/// until a mutation invalidates it.
pub fn policy_for(key: &ResourceKey) -> FreshnessPolicy {
    match key.name() {
        "sessions" | "health" => FreshnessPolicy::default().with_poll(LIVE_POLL_INTERVAL),
        _ => FreshnessPolicy::default(),
    }
}
