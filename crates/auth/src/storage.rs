//! Durable credential storage boundary.
//!
//! The credential survives process restarts through this boundary. Values
//! are opaque strings under a fixed name; there is no schema beyond
//! get/set/remove.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Durable store for the bearer credential.
///
/// Implementations must swallow their own failures: credential persistence is
/// best-effort, and a broken store degrades to the anonymous state rather
/// than surfacing errors into login/logout flows.
pub trait CredentialStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str);
    fn remove(&self, name: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.lock().ok()?.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(name.to_string(), value.to_string());
        }
    }

    fn remove(&self, name: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(name);
        }
    }
}

/// File-backed store: one file per name under a base directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, name: &str) -> Option<String> {
        match fs::read_to_string(self.path(name)) {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!(name, error = %err, "credential read failed");
                None
            }
        }
    }

    fn set(&self, name: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            warn!(name, error = %err, "credential directory creation failed");
            return;
        }
        if let Err(err) = fs::write(self.path(name), value) {
            warn!(name, error = %err, "credential write failed");
        }
    }

    fn remove(&self, name: &str) {
        match fs::remove_file(self.path(name)) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(name, error = %err, "credential removal failed"),
        }
    }
}
