//! `lanhall-auth` — credential decoding, principal state, and route gating.
//!
//! Everything here is a UX convenience layered over server-side checks: the
//! credential is decoded without signature verification, and gate decisions
//! only steer navigation. The server remains the authority on every
//! operation.

pub mod claims;
pub mod gate;
pub mod principal;
pub mod storage;
pub mod store;

pub use claims::{Claims, decode, principal_for};
pub use gate::{
    AccessPolicy, GateDecision, RouteTarget, authenticated_gate, elevated_gate, evaluate,
    landing_route, privileged_gate,
};
pub use principal::{Principal, Role};
pub use storage::{CredentialStore, FileCredentialStore, InMemoryCredentialStore};
pub use store::{CREDENTIAL_NAME, PrincipalStore};
