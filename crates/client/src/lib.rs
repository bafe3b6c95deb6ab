//! `lanhall-client` — composition root for the admin client core.
//!
//! Wires the principal store, the resource cache, and the mutation
//! coordinator into one lifetime-scoped context, and centralizes the
//! application's well-known resource keys.

pub mod context;
pub mod resources;


pub use context::ClientContext;
