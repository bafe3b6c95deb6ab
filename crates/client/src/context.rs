//! Lifetime-scoped application context.
//!
//! One explicitly constructed object owns the shared state; nothing here is
//! a hidden global. The composition root builds a context at startup and
//! hands it to the routing/rendering layers; tests build a fresh context per
//! case so no state leaks between them.

use std::sync::Arc;

use lanhall_auth::{CredentialStore, PrincipalStore};
use lanhall_cache::{MutationCoordinator, ResourceCache};

/// The client core, fully wired.
pub struct ClientContext {
    principals: PrincipalStore,
    cache: ResourceCache,
    mutations: MutationCoordinator,
}

impl ClientContext {
    /// Build the context over the given durable credential store, picking up
    /// a persisted credential from an earlier run.
    pub fn new(storage: Arc<dyn CredentialStore>) -> Self {
        let cache = ResourceCache::new();
        Self {
            principals: PrincipalStore::new(storage),
            mutations: MutationCoordinator::new(cache.clone()),
            cache,
        }
    }

    pub fn principals(&self) -> &PrincipalStore {
        &self.principals
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn mutations(&self) -> &MutationCoordinator {
        &self.mutations
    }

    /// Clear the credential and every cached resource in one step.
    ///
    /// Cached data belongs to the session that fetched it; none of it may
    /// survive into the next sign-in.
    pub fn logout(&self) {
        self.principals.logout();
        self.cache.clear();
    }
}
