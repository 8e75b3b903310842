//! Visitor Identity Value Object
//!
//! An opaque, stable identifier for presence tracking: a salted one-way
//! hash of the client's coarse network identity, truncated to bound the
//! storage cost of set members. The raw address never reaches the store.

use platform::crypto::{sha256, truncated_hex};
use std::net::IpAddr;

/// Digest bytes kept after truncation (16 hex chars)
const IDENTITY_HASH_BYTES: usize = 8;

/// Opaque visitor identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisitorIdentity(String);

impl VisitorIdentity {
    /// Resolve an identity from a client address.
    ///
    /// Returns `None` for unidentifiable clients; callers record nothing
    /// for those and report success trivially.
    pub fn resolve(salt: &str, ip: Option<IpAddr>) -> Option<Self> {
        let ip = ip?;
        let digest = sha256(format!("{}:{}", salt, ip).as_bytes());
        Some(Self(truncated_hex(&digest, IDENTITY_HASH_BYTES)))
    }

    /// The hashed identity as stored in the presence set
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VisitorIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
