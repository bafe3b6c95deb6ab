//! Bearer-credential claims reader.
//!
//! Decodes the payload segment of the opaque credential issued at login so
//! the client can derive a [`Principal`] without a network round-trip.
//!
//! **Non-authoritative.** The signature segment is never verified here; this
//! decode only feeds display and navigation hints. Every operation the
//! derived role appears to permit is still checked server-side.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::principal::{Principal, Role};

/// Claims carried in the payload segment of a credential.
///
/// Unknown fields are ignored; every recognized field is optional so a
/// partially populated payload still decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's identity (email).
    #[serde(default)]
    pub sub: Option<String>,

    /// Granted role; absent or unrecognized collapses to [`Role::Member`].
    #[serde(default)]
    pub role: Option<Role>,

    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// Expiry instant, when the payload carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Whether the expiry instant has passed.
    ///
    /// Display use only: principal derivation deliberately ignores expiry,
    /// since the server rejects an expired credential on the next request
    /// anyway.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|at| now >= at)
    }
}

/// Decode the claims of a three-segment dot-delimited credential.
///
/// Returns `None` on any malformed input (wrong segment count, invalid
/// base64url, invalid UTF-8, invalid JSON) and never panics. Malformed
/// credentials are indistinguishable from being logged out.
pub fn decode(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let bytes = decode_segment(payload)?;
    // from_slice validates UTF-8, so non-ASCII claim values (Cyrillic display
    // names) come through intact.
    serde_json::from_slice(&bytes).ok()
}

/// Derive the acting principal from the current credential, if any.
///
/// `None` when the token is absent, fails to decode, or carries no subject.
/// A missing role claim defaults to the least-privileged role.
pub fn principal_for(token: Option<&str>) -> Option<Principal> {
    let claims = decode(token?)?;
    let identity = claims.sub?;
    Some(Principal {
        identity,
        role: claims.role.unwrap_or_default(),
    })
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    // Issuers emit both padded and unpadded base64url.
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD.decode(trimmed).ok()
}
