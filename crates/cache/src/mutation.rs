//! Mutation lifecycle tracking and post-success cache invalidation.
//!
//! A mutation is one externally supplied state-changing remote call. The
//! coordinator runs it, tracks its status on an observable record, and on
//! success invalidates the cache keys the caller declared affected before
//! the record turns `Success`, so an observer of the terminal state can rely
//! on the cache already reflecting the write. A failed action leaves the
//! cache untouched.
//!
//! No automatic retry: re-submitting is a caller decision.

use std::future::Future;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use lanhall_core::{ChangeFeed, Subscription};

use crate::key::KeySelector;
use crate::store::ResourceCache;

/// Lifecycle status of one user-initiated mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MutationStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// The action failed; the cache was not disturbed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("mutation failed: {message}")]
pub struct MutationError {
    pub message: String,
}

#[derive(Debug, Clone)]
struct RecordState {
    status: MutationStatus,
    error: Option<String>,
}

struct RecordShared {
    id: Uuid,
    state: Mutex<RecordState>,
    changes: ChangeFeed<MutationStatus>,
}

/// Observable record of one mutation.
///
/// Cloneable handle; clones observe the same underlying state. Scoped to the
/// lifetime of a single action; drop it once the UI has consumed the
/// terminal state.
#[derive(Clone)]
pub struct MutationRecord {
    shared: Arc<RecordShared>,
}

impl MutationRecord {
    fn new() -> Self {
        Self {
            shared: Arc::new(RecordShared {
                id: Uuid::now_v7(),
                state: Mutex::new(RecordState {
                    status: MutationStatus::Idle,
                    error: None,
                }),
                changes: ChangeFeed::new(),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn status(&self) -> MutationStatus {
        self.shared
            .state
            .lock()
            .map(|state| state.status)
            .unwrap_or(MutationStatus::Error)
    }

    pub fn error(&self) -> Option<String> {
        self.shared
            .state
            .lock()
            .ok()
            .and_then(|state| state.error.clone())
    }

    /// Status change feed. Dropping the handle unsubscribes.
    pub fn subscribe(&self) -> Subscription<MutationStatus> {
        self.shared.changes.subscribe()
    }

    fn set(&self, status: MutationStatus, error: Option<String>) {
        if let Ok(mut state) = self.shared.state.lock() {
            state.status = status;
            state.error = error;
        }
        self.shared.changes.publish(status);
    }
}

/// Executes state-changing remote calls and keeps the cache consistent.
#[derive(Clone)]
pub struct MutationCoordinator {
    cache: ResourceCache,
}

impl MutationCoordinator {
    pub fn new(cache: ResourceCache) -> Self {
        Self { cache }
    }

    /// A fresh record for one action.
    pub fn record(&self) -> MutationRecord {
        MutationRecord::new()
    }

    /// Run one remote action to its terminal state.
    ///
    /// On success the affected selectors are invalidated synchronously before
    /// the record reports `Success` and the action's output is passed
    /// through. The underlying re-fetches may still be in flight at that
    /// point; readers observe the stale-to-fresh transition shortly after.
    pub async fn run<T, F>(
        &self,
        record: &MutationRecord,
        action: F,
        affected: &[KeySelector],
    ) -> Result<T, MutationError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        record.set(MutationStatus::Pending, None);
        match action.await {
            Ok(output) => {
                for selector in affected {
                    self.cache.invalidate(selector);
                }
                debug!(mutation = %record.id(), affected = affected.len(), "mutation applied");
                record.set(MutationStatus::Success, None);
                Ok(output)
            }
            Err(err) => {
                let message = format!("{err:#}");
                warn!(mutation = %record.id(), error = %message, "mutation failed");
                record.set(MutationStatus::Error, Some(message.clone()));
                Err(MutationError { message })
            }
        }
    }

    /// Dispatch an action to run on the runtime, detached from the caller.
    ///
    /// Navigating away from the initiating view must not cancel an in-flight
    /// mutation; a detached task runs it to completion and still invalidates
    /// on success. Progress is observable through the record; the action's
    /// output is discarded.
    pub fn dispatch<T, F>(&self, record: &MutationRecord, action: F, affected: Vec<KeySelector>)
    where
        T: Send + 'static,
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(mutation = %record.id(), "no async runtime; mutation not dispatched");
            record.set(
                MutationStatus::Error,
                Some("no async runtime available".to_string()),
            );
            return;
        };
        let coordinator = self.clone();
        let record = record.clone();
        handle.spawn(async move {
            let _ = coordinator.run(&record, action, &affected).await;
        });
    }
}
