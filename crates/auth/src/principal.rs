//! Principal model: who is acting, and with which role.

use serde::{Deserialize, Serialize};

/// Role granted to a principal.
///
/// Closed enumeration: the wire format is a free string, but everything a
/// role gates on is decided by exhaustive matches over this type. Unknown or
/// missing role strings collapse to [`Role::Member`], the least-privileged
/// role, so a malformed claim can never elevate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    /// Full administrative access to every screen.
    Admin,
    /// Staff role operating the hall floor (sessions, payments, machines).
    Operator,
    /// A paying club member; sees only their own profile and balance.
    #[default]
    #[serde(rename = "user")]
    Member,
}

impl Role {
    /// The wire string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Member => "user",
        }
    }

    /// Parse a wire string; anything unrecognized is the least-privileged
    /// role.
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "operator" => Role::Operator,
            _ => Role::Member,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated identity derived from the current credential.
///
/// A `Principal` never exists without a backing credential; the anonymous
/// state is `Option::<Principal>::None`. It is always recomputed from the
/// credential, never stored independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity claim, typically an email address.
    pub identity: String,
    pub role: Role,
}

impl Principal {
    pub fn new(identity: impl Into<String>, role: Role) -> Self {
        Self {
            identity: identity.into(),
            role,
        }
    }
}
