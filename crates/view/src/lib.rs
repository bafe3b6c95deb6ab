//! `lanhall-view` — deterministic list projection.
//!
//! Every list screen renders through the same pure pipeline: filter the full
//! collection, optionally split it into named partitions, paginate each
//! group, and compress long page ranges for display. Keeping this in one
//! place is what makes twenty tables behave identically.

pub mod list;
pub mod page;
pub mod window;

pub use list::{ListState, Partition, project, project_partitioned};
pub use page::{PageRequest, PageResult, paginate};
pub use window::{PageToken, page_window};
