//! Reactive holder of the current credential.
//!
//! Single source of truth for "who is logged in". The store holds the raw
//! credential; the principal is always derived on demand so a replaced
//! credential takes effect on the very next read, with no invalidation step.
//!
//! Construct one store per process lifetime and pass it down explicitly;
//! tests build a fresh store per case.

use std::sync::{Arc, RwLock};

use tracing::debug;

use lanhall_core::{ChangeFeed, Subscription};

use crate::claims;
use crate::principal::Principal;
use crate::storage::CredentialStore;

/// Fixed name under which the credential is persisted.
pub const CREDENTIAL_NAME: &str = "token";

/// Process-wide credential holder with change notification.
pub struct PrincipalStore {
    storage: Arc<dyn CredentialStore>,
    token: RwLock<Option<String>>,
    changes: ChangeFeed<Option<Principal>>,
}

impl PrincipalStore {
    /// Build the store, picking up a credential persisted by an earlier
    /// process run (absent means anonymous).
    pub fn new(storage: Arc<dyn CredentialStore>) -> Self {
        let token = storage.get(CREDENTIAL_NAME);
        Self {
            storage,
            token: RwLock::new(token),
            changes: ChangeFeed::new(),
        }
    }

    /// The raw credential, if any.
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    /// Replace or clear the credential, writing through to durable storage.
    pub fn set_token(&self, token: Option<String>) {
        match &token {
            Some(value) => self.storage.set(CREDENTIAL_NAME, value),
            None => self.storage.remove(CREDENTIAL_NAME),
        }
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
        self.notify();
    }

    /// Clear the credential from the store and from durable storage.
    pub fn logout(&self) {
        debug!("credential cleared");
        self.set_token(None);
    }

    /// The acting principal, derived from the current credential.
    ///
    /// Recomputed on every call, never cached.
    pub fn principal(&self) -> Option<Principal> {
        claims::principal_for(self.token().as_deref())
    }

    /// Change feed publishing the derived principal after every credential
    /// change.
    pub fn subscribe(&self) -> Subscription<Option<Principal>> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        self.changes.publish(self.principal());
    }
}
