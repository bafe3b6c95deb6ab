//! Keyed store of server-derived state shared by every screen.
//!
//! Each entry is tagged with the resolver that (re)fetches it and a freshness
//! policy. Reads are non-blocking: they return the current snapshot and, when
//! the entry is absent or no longer fresh, schedule a background resolution.
//! Subscribers receive a snapshot after every state change.
//!
//! Ordering within one key: every resolution carries a monotonic sequence
//! number, and an invalidation advances the key's sequence. A resolution that
//! completes with a superseded sequence number is discarded wholesale, so an
//! old slow response can never overwrite the effect of a newer invalidation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, trace, warn};

use lanhall_core::{ChangeFeed, Subscription};

use crate::entry::{EntryStatus, Snapshot};
use crate::key::{KeySelector, ResourceKey};
use crate::resolver::Resolver;

/// Freshness policy for one cache key.
///
/// The default keeps an entry fresh until it is explicitly invalidated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FreshnessPolicy {
    /// After this long, a fresh entry is served stale and re-resolved in the
    /// background on its next read.
    pub ttl: Option<Duration>,
    /// Re-resolve on this interval while the key has live subscribers
    /// (near-real-time views such as running sessions).
    pub poll: Option<Duration>,
}

impl FreshnessPolicy {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_poll(mut self, interval: Duration) -> Self {
        self.poll = Some(interval);
        self
    }
}

struct Entry {
    status: EntryStatus,
    data: Option<Value>,
    error: Option<String>,
    last_resolved_at: Option<DateTime<Utc>>,
    resolved_instant: Option<Instant>,
    policy: FreshnessPolicy,
    resolver: Option<Arc<dyn Resolver>>,
    /// Highest sequence number issued for this key (resolutions and
    /// invalidations both advance it).
    latest_seq: u64,
    /// Sequence number of the resolution currently in flight, if any.
    in_flight: Option<u64>,
    polling: bool,
}

impl Entry {
    fn new() -> Self {
        Self {
            status: EntryStatus::Idle,
            data: None,
            error: None,
            last_resolved_at: None,
            resolved_instant: None,
            policy: FreshnessPolicy::default(),
            resolver: None,
            latest_seq: 0,
            in_flight: None,
            polling: false,
        }
    }

    /// Whether the in-flight resolution, if any, is still the newest issued.
    fn resolution_current(&self) -> bool {
        self.in_flight.is_some_and(|seq| seq == self.latest_seq)
    }

    fn ttl_expired(&self) -> bool {
        match (self.policy.ttl, self.resolved_instant) {
            (Some(ttl), Some(at)) => at.elapsed() >= ttl,
            _ => false,
        }
    }

    fn issue(&mut self) -> u64 {
        self.latest_seq += 1;
        self.in_flight = Some(self.latest_seq);
        if self.data.is_none() && self.status != EntryStatus::Error {
            self.status = EntryStatus::Loading;
        }
        self.latest_seq
    }

    fn snapshot(&self, key: &ResourceKey) -> Snapshot {
        Snapshot {
            key: key.clone(),
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            last_resolved_at: self.last_resolved_at,
        }
    }
}

struct CacheInner {
    entries: Mutex<HashMap<ResourceKey, Entry>>,
    feeds: Mutex<HashMap<ResourceKey, ChangeFeed<Snapshot>>>,
}

/// The shared resource cache.
///
/// Cheap to clone; clones share one underlying store. Construct one per
/// process lifetime (tests build a fresh cache per case) and pass it down
/// explicitly.
#[derive(Clone)]
pub struct ResourceCache {
    inner: Arc<CacheInner>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: Mutex::new(HashMap::new()),
                feeds: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Current snapshot for `key`, scheduling resolution when the entry is
    /// absent or no longer fresh.
    ///
    /// Non-blocking: the returned snapshot reflects the state at call time
    /// and subscribers are notified once the scheduled resolution lands. The
    /// resolver and policy from the most recent read are retained on the
    /// entry for re-resolution after invalidation, TTL expiry, or a poll
    /// tick. At most one resolution is in flight per key; a read issued
    /// meanwhile attaches to it instead of duplicating the fetch.
    pub fn read(
        &self,
        key: &ResourceKey,
        resolver: Arc<dyn Resolver>,
        policy: FreshnessPolicy,
    ) -> Snapshot {
        let mut fetch_seq = None;
        let mut start_poll = None;
        let snapshot = {
            let mut entries = guard(&self.inner.entries);
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.resolver = Some(Arc::clone(&resolver));
            entry.policy = policy;

            if !entry.resolution_current() {
                match entry.status {
                    EntryStatus::Fresh => {
                        if entry.ttl_expired() {
                            entry.status = EntryStatus::Stale;
                            fetch_seq = Some(entry.issue());
                        }
                    }
                    EntryStatus::Idle
                    | EntryStatus::Loading
                    | EntryStatus::Stale
                    | EntryStatus::Error => {
                        fetch_seq = Some(entry.issue());
                    }
                }
            }

            if let Some(interval) = policy.poll {
                if !entry.polling {
                    entry.polling = true;
                    start_poll = Some(interval);
                }
            }

            entry.snapshot(key)
        };

        if let Some(seq) = fetch_seq {
            self.inner.spawn_resolution(key.clone(), resolver, seq);
        }
        if let Some(interval) = start_poll {
            self.inner.spawn_poll(key.clone(), interval);
        }
        snapshot
    }

    /// Read-only peek without scheduling anything.
    pub fn snapshot(&self, key: &ResourceKey) -> Option<Snapshot> {
        let entries = guard(&self.inner.entries);
        entries.get(key).map(|entry| entry.snapshot(key))
    }

    /// Snapshot change feed for one key. Dropping the handle unsubscribes.
    pub fn subscribe(&self, key: &ResourceKey) -> Subscription<Snapshot> {
        let mut feeds = guard(&self.inner.feeds);
        feeds.entry(key.clone()).or_default().subscribe()
    }

    /// Mark matching entries stale and supersede their in-flight resolutions.
    ///
    /// Entries with live subscribers re-resolve immediately; unobserved
    /// entries re-resolve lazily on their next read.
    pub fn invalidate(&self, selector: &KeySelector) {
        self.invalidate_where(|key| selector.matches(key));
    }

    /// Predicate form of [`ResourceCache::invalidate`].
    pub fn invalidate_where(&self, predicate: impl Fn(&ResourceKey) -> bool) {
        let mut notifications = Vec::new();
        let mut refetches = Vec::new();
        {
            let mut entries = guard(&self.inner.entries);
            for (key, entry) in entries.iter_mut() {
                if !predicate(key) {
                    continue;
                }
                // Supersede whatever is in flight, even when no re-resolve is
                // scheduled here: a late completion must not register as
                // fresh.
                entry.latest_seq += 1;
                entry.status = if entry.data.is_some() {
                    EntryStatus::Stale
                } else {
                    EntryStatus::Idle
                };
                debug!(key = %key, "invalidated");

                if self.inner.subscriber_count(key) > 0 {
                    if let Some(resolver) = entry.resolver.clone() {
                        let seq = entry.issue();
                        refetches.push((key.clone(), resolver, seq));
                    }
                }
                notifications.push((key.clone(), entry.snapshot(key)));
            }
        }
        for (key, snapshot) in notifications {
            self.inner.publish(&key, snapshot);
        }
        for (key, resolver, seq) in refetches {
            self.inner.spawn_resolution(key, resolver, seq);
        }
    }

    /// Drop every entry and subscription (explicit cache-clear, e.g. logout).
    pub fn clear(&self) {
        guard(&self.inner.entries).clear();
        // Dropping the feeds disconnects subscribers, which consumers observe
        // as a closed channel.
        guard(&self.inner.feeds).clear();
        debug!("cache cleared");
    }
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheInner {
    fn spawn_resolution(self: &Arc<Self>, key: ResourceKey, resolver: Arc<dyn Resolver>, seq: u64) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(key = %key, "no async runtime; resolution dropped");
            let mut entries = guard(&self.entries);
            if let Some(entry) = entries.get_mut(&key) {
                if entry.in_flight == Some(seq) {
                    entry.in_flight = None;
                }
            }
            return;
        };
        trace!(key = %key, seq, "resolution issued");
        let inner = Arc::clone(self);
        handle.spawn(async move {
            let outcome = resolver.resolve().await;
            inner.complete(&key, seq, outcome);
        });
    }

    /// Apply (or discard) the outcome of one resolution.
    fn complete(&self, key: &ResourceKey, seq: u64, outcome: anyhow::Result<Value>) {
        let snapshot = {
            let mut entries = guard(&self.entries);
            let Some(entry) = entries.get_mut(key) else {
                // Cleared while in flight.
                return;
            };
            if entry.in_flight == Some(seq) {
                entry.in_flight = None;
            }
            if seq < entry.latest_seq {
                trace!(key = %key, seq, latest = entry.latest_seq, "superseded resolution discarded");
                return;
            }
            match outcome {
                Ok(value) => {
                    entry.data = Some(value);
                    entry.status = EntryStatus::Fresh;
                    entry.error = None;
                    entry.last_resolved_at = Some(Utc::now());
                    entry.resolved_instant = Some(Instant::now());
                    trace!(key = %key, seq, "resolution applied");
                }
                Err(err) => {
                    // Keep the last known-good data: a transient failure must
                    // not blank a populated screen.
                    entry.status = EntryStatus::Error;
                    entry.error = Some(format!("{err:#}"));
                    debug!(key = %key, seq, error = %err, "resolution failed");
                }
            }
            entry.snapshot(key)
        };
        self.publish(key, snapshot);
    }

    /// One poll tick. Returns the next wait, or `None` to stop polling.
    fn poll_tick(self: &Arc<Self>, key: &ResourceKey) -> Option<Duration> {
        if self.subscriber_count(key) == 0 {
            let mut entries = guard(&self.entries);
            if let Some(entry) = entries.get_mut(key) {
                entry.polling = false;
            }
            trace!(key = %key, "polling stopped: no subscribers");
            return None;
        }

        let (next, job) = {
            let mut entries = guard(&self.entries);
            let entry = entries.get_mut(key)?;
            let Some(interval) = entry.policy.poll else {
                entry.polling = false;
                return None;
            };
            let job = if entry.resolution_current() {
                None
            } else {
                entry.resolver.clone().map(|resolver| {
                    let seq = entry.issue();
                    (resolver, seq)
                })
            };
            (interval, job)
        };

        if let Some((resolver, seq)) = job {
            trace!(key = %key, seq, "poll re-resolve");
            self.spawn_resolution(key.clone(), resolver, seq);
        }
        Some(next)
    }

    fn spawn_poll(self: &Arc<Self>, key: ResourceKey, interval: Duration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(key = %key, "no async runtime; polling disabled");
            let mut entries = guard(&self.entries);
            if let Some(entry) = entries.get_mut(&key) {
                entry.polling = false;
            }
            return;
        };
        let weak = Arc::downgrade(self);
        handle.spawn(async move {
            let mut wait = interval;
            loop {
                tokio::time::sleep(wait).await;
                let Some(inner) = weak.upgrade() else { break };
                match inner.poll_tick(&key) {
                    Some(next) => wait = next,
                    None => break,
                }
            }
        });
    }

    fn publish(&self, key: &ResourceKey, snapshot: Snapshot) {
        let feeds = guard(&self.feeds);
        if let Some(feed) = feeds.get(key) {
            feed.publish(snapshot);
        }
    }

    fn subscriber_count(&self, key: &ResourceKey) -> usize {
        let feeds = guard(&self.feeds);
        feeds.get(key).map_or(0, ChangeFeed::subscriber_count)
    }
}

// Poisoning implies a panic while holding the lock; recover the guard and
// keep serving rather than cascading the panic into every reader.
fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;

    /// Counts invocations and returns a fixed value.
    struct CountingResolver {
        calls: AtomicUsize,
        value: Value,
    }

    impl CountingResolver {
        fn new(value: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                value,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Resolver for CountingResolver {
        async fn resolve(&self) -> anyhow::Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value.clone())
        }
    }

    /// First call blocks on the gate and returns `first`; later calls return
    /// `rest` immediately.
    struct GatedResolver {
        calls: AtomicUsize,
        gate: Notify,
        first: Value,
        rest: Value,
    }

    impl GatedResolver {
        fn new(first: Value, rest: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: Notify::new(),
                first,
                rest,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Resolver for GatedResolver {
        async fn resolve(&self) -> anyhow::Result<Value> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.gate.notified().await;
                Ok(self.first.clone())
            } else {
                Ok(self.rest.clone())
            }
        }
    }

    /// Succeeds once, then fails on every subsequent call.
    struct FlakyResolver {
        calls: AtomicUsize,
    }

    impl FlakyResolver {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Resolver for FlakyResolver {
        async fn resolve(&self) -> anyhow::Result<Value> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(json!([{"id": 1, "name": "PC-01"}]))
            } else {
                Err(anyhow::anyhow!("backend unreachable"))
            }
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl Resolver for FailingResolver {
        async fn resolve(&self) -> anyhow::Result<Value> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached within 2s");
    }

    fn machines_key() -> ResourceKey {
        ResourceKey::new("machines")
    }

    #[tokio::test]
    async fn second_read_is_a_cache_hit() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = CountingResolver::new(json!(["PC-01"]));

        let first = cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        assert_eq!(first.status, EntryStatus::Loading);

        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;

        let second = cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        assert_eq!(second.status, EntryStatus::Fresh);
        assert_eq!(second.data, Some(json!(["PC-01"])));
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn invalidate_then_read_re_resolves_exactly_once() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = CountingResolver::new(json!(["PC-01"]));

        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;

        cache.invalidate(&KeySelector::from(key.clone()));
        assert_eq!(cache.snapshot(&key).unwrap().status, EntryStatus::Stale);

        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;
        assert_eq!(resolver.calls(), 2);
    }

    #[tokio::test]
    async fn superseded_resolution_is_discarded() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = GatedResolver::new(json!("old"), json!("new"));

        // First resolution hangs on the gate.
        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| resolver.calls() == 1).await;

        // The invalidation outranks it; the next read issues a second fetch.
        cache.invalidate(&KeySelector::from(key.clone()));
        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| cache.snapshot(&key).unwrap().data == Some(json!("new"))).await;
        assert_eq!(resolver.calls(), 2);

        // Now let the old response land: it must be thrown away.
        resolver.gate.notify_one();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let snap = cache.snapshot(&key).unwrap();
        assert_eq!(snap.data, Some(json!("new")));
        assert_eq!(snap.status, EntryStatus::Fresh);
        assert_eq!(resolver.calls(), 2);
    }

    #[tokio::test]
    async fn concurrent_reads_attach_to_one_resolution() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = GatedResolver::new(json!(["PC-01"]), json!(["PC-02"]));

        for _ in 0..3 {
            cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(resolver.calls(), 1);

        resolver.gate.notify_one();
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;
        assert_eq!(cache.snapshot(&key).unwrap().data, Some(json!(["PC-01"])));
    }

    #[tokio::test]
    async fn failed_refresh_retains_last_known_good_data() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = FlakyResolver::new();

        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;

        cache.invalidate(&KeySelector::from(key.clone()));
        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Error).await;

        let snap = cache.snapshot(&key).unwrap();
        assert!(snap.is_degraded());
        assert!(!snap.is_unavailable());
        assert_eq!(snap.data, Some(json!([{"id": 1, "name": "PC-01"}])));
        assert!(snap.error.unwrap().contains("backend unreachable"));
    }

    #[tokio::test]
    async fn failed_initial_load_is_unavailable() {
        let cache = ResourceCache::new();
        let key = machines_key();

        cache.read(&key, Arc::new(FailingResolver), FreshnessPolicy::default());
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Error).await;

        let snap = cache.snapshot(&key).unwrap();
        assert!(snap.is_unavailable());
        assert_eq!(snap.data, None);
    }

    #[tokio::test]
    async fn subscribers_receive_resolution_snapshots() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let sub = cache.subscribe(&key);

        cache.read(
            &key,
            CountingResolver::new(json!(["PC-01"])),
            FreshnessPolicy::default(),
        );
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;

        let snapshot = sub.try_recv().unwrap();
        assert_eq!(snapshot.status, EntryStatus::Fresh);
        assert_eq!(snapshot.data, Some(json!(["PC-01"])));
    }

    #[tokio::test]
    async fn invalidation_refetches_subscribed_keys_immediately() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = CountingResolver::new(json!(["PC-01"]));
        let _sub = cache.subscribe(&key);

        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;

        // No read needed: the live subscriber alone triggers the re-resolve.
        cache.invalidate(&KeySelector::from(key.clone()));
        wait_until(|| resolver.calls() == 2).await;
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;
    }

    #[tokio::test]
    async fn family_invalidation_cascades_to_every_variant() {
        let cache = ResourceCache::new();
        let all = ResourceKey::new("audit-logs");
        let filtered = ResourceKey::new("audit-logs").with_param("user_id", 5);
        let other = ResourceKey::new("bookings");

        let logs = CountingResolver::new(json!([]));
        let bookings = CountingResolver::new(json!([]));

        cache.read(&all, logs.clone(), FreshnessPolicy::default());
        cache.read(&filtered, logs.clone(), FreshnessPolicy::default());
        cache.read(&other, bookings.clone(), FreshnessPolicy::default());
        for key in [&all, &filtered, &other] {
            wait_until(|| cache.snapshot(key).unwrap().status == EntryStatus::Fresh).await;
        }

        cache.invalidate(&KeySelector::family("audit-logs"));

        assert_eq!(cache.snapshot(&all).unwrap().status, EntryStatus::Stale);
        assert_eq!(cache.snapshot(&filtered).unwrap().status, EntryStatus::Stale);
        assert_eq!(cache.snapshot(&other).unwrap().status, EntryStatus::Fresh);
    }

    #[tokio::test]
    async fn expired_ttl_serves_stale_and_refreshes_in_background() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = CountingResolver::new(json!(["PC-01"]));
        let policy = FreshnessPolicy::default().with_ttl(Duration::from_millis(50));

        cache.read(&key, resolver.clone(), policy);
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;

        tokio::time::sleep(Duration::from_millis(120)).await;

        // Served immediately with the old data, refreshed behind the scenes.
        let stale = cache.read(&key, resolver.clone(), policy);
        assert_eq!(stale.status, EntryStatus::Stale);
        assert_eq!(stale.data, Some(json!(["PC-01"])));

        wait_until(|| resolver.calls() == 2).await;
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;
    }

    #[tokio::test]
    async fn polling_refreshes_while_subscribed_then_stops() {
        let cache = ResourceCache::new();
        let key = ResourceKey::new("sessions");
        let resolver = CountingResolver::new(json!([]));
        let policy = FreshnessPolicy::default().with_poll(Duration::from_millis(40));

        let sub = cache.subscribe(&key);
        cache.read(&key, resolver.clone(), policy);
        wait_until(|| resolver.calls() >= 3).await;

        drop(sub);
        // The poll loop notices the dropped subscriber within a tick or two.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let settled = resolver.calls();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(resolver.calls(), settled);
    }

    #[tokio::test]
    async fn clear_drops_entries_and_disconnects_subscribers() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = CountingResolver::new(json!(["PC-01"]));
        let sub = cache.subscribe(&key);

        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| cache.snapshot(&key).unwrap().status == EntryStatus::Fresh).await;

        cache.clear();
        assert!(cache.snapshot(&key).is_none());
        // Drain anything published before the clear, then observe the
        // disconnect.
        while sub.try_recv().is_ok() {}
        assert!(matches!(
            sub.try_recv(),
            Err(std::sync::mpsc::TryRecvError::Disconnected)
        ));

        // A fresh read repopulates from scratch.
        cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        wait_until(|| resolver.calls() == 2).await;
    }

    #[test]
    fn read_outside_a_runtime_degrades_without_panicking() {
        let cache = ResourceCache::new();
        let key = machines_key();
        let resolver = CountingResolver::new(json!([]));

        let snap = cache.read(&key, resolver.clone(), FreshnessPolicy::default());
        assert_eq!(snap.status, EntryStatus::Loading);
        assert_eq!(resolver.calls(), 0);
    }
}
