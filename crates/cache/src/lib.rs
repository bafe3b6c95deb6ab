//! `lanhall-cache` — shared resource cache and mutation coordination.
//!
//! Every screen reads server-derived state through one keyed cache, so two
//! screens showing the same resource always agree, and a successful mutation
//! brings them all up to date by invalidating the keys it affected.
//!
//! Pages are read-only consumers: all entry mutation flows through resolver
//! completion or invalidation, never through a page writing cache state
//! directly.

pub mod entry;
pub mod key;
pub mod mutation;
pub mod resolver;
pub mod store;

pub use entry::{EntryStatus, Snapshot};
pub use key::{KeySelector, ResourceKey};
pub use mutation::{MutationCoordinator, MutationError, MutationRecord, MutationStatus};
pub use resolver::{FnResolver, Resolver};
pub use store::{FreshnessPolicy, ResourceCache};
