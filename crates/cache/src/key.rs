//! Cache key model.
//!
//! A key is a resource name plus canonicalized query parameters, so the same
//! logical query always lands on the same entry no matter which screen built
//! it or in which order it supplied the parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one cached resource variant.
///
/// Canonical form is `name` for an unparameterized resource and
/// `name(k1=v1,k2=v2)` with parameters sorted by key, e.g. `bookings` or
/// `audit-logs(action=START,user_id=5)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    name: String,
    params: BTreeMap<String, String>,
}

impl ResourceKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add one query parameter. Repeated keys overwrite.
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// The resource (family) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.params.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str(")")
    }
}

/// Selects cache entries, typically for invalidation.
///
/// A single mutation often affects every parameterized variant of a resource
/// (all filtered views of the audit log, say); `Family` cascades over the
/// whole name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySelector {
    /// Exactly one key.
    Exact(ResourceKey),
    /// Every variant of a resource name, whatever its parameters.
    Family(String),
}

impl KeySelector {
    pub fn family(name: impl Into<String>) -> Self {
        KeySelector::Family(name.into())
    }

    pub fn matches(&self, key: &ResourceKey) -> bool {
        match self {
            KeySelector::Exact(exact) => exact == key,
            KeySelector::Family(name) => key.name() == name,
        }
    }
}

impl From<ResourceKey> for KeySelector {
    fn from(key: ResourceKey) -> Self {
        KeySelector::Exact(key)
    }
}
