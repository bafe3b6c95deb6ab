//! Change-notification primitive (mechanics only).
//!
//! Stores that hold shared state expose a `ChangeFeed`: consumers subscribe
//! and receive a copy of every published message over a channel, so rendering
//! layers can react to state changes without polling. The feed makes minimal
//! assumptions:
//!
//! - **Broadcast semantics**: each subscriber gets a copy of every message
//!   published after it subscribed.
//! - **Best-effort fan-out**: a subscriber that stopped listening is dropped
//!   on the next publish; publishing never blocks on a slow consumer.
//! - **No replay**: the feed distributes changes, it does not store them. The
//!   owning store remains the source of truth; subscribers read current state
//!   from it and use the feed only as a wake-up signal.
//!
//! Unsubscribing is dropping the `Subscription`.

use std::sync::{Mutex, mpsc};
use std::time::Duration;

/// A subscription to a change feed.
///
/// Each subscription receives messages in publish order. Subscriptions are
/// designed for single-threaded consumption: one view, one subscription.
///
/// A `RecvError`/`Disconnected` result means the feed (and the store behind
/// it) is gone; consumers should detach.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: mpsc::Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: mpsc::Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Observer registry for one piece of shared state.
#[derive(Debug)]
pub struct ChangeFeed<M> {
    senders: Mutex<Vec<mpsc::Sender<M>>>,
}

impl<M> ChangeFeed<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned the subscription is still returned; it just
        // never receives messages.
        if let Ok(mut senders) = self.senders.lock() {
            senders.push(tx);
        }

        Subscription::new(rx)
    }

    /// Number of registered subscribers.
    ///
    /// Upper bound: subscribers that dropped their handle are only pruned on
    /// the next `publish`.
    pub fn subscriber_count(&self) -> usize {
        self.senders.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl<M: Clone> ChangeFeed<M> {
    /// Fan a message out to every live subscriber, pruning dead ones.
    pub fn publish(&self, message: M) {
        if let Ok(mut senders) = self.senders.lock() {
            senders.retain(|tx| tx.send(message.clone()).is_ok());
        }
    }
}

impl<M> Default for ChangeFeed<M> {
    fn default() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }
}
