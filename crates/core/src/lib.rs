//! `lanhall-core` — shared foundation for the client core.
//!
//! Pure building blocks with no I/O: the change-notification primitive used
//! by the reactive stores (principal state, resource cache, mutations).

pub mod notify;

pub use notify::{ChangeFeed, Subscription};
