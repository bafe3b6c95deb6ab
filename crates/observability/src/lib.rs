//! Tracing/logging setup shared by every binary embedding the client core.
//!
//! The core crates only emit through `tracing` macros and never install a
//! subscriber themselves; the embedding process calls [`init`] once at
//! startup.

pub mod tracing;

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
