//! Strong type definitions for Multiseal.
//!
//! Identifiers are newtypes so a recipient name can never be confused with
//! key material or display text at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque name of a party that may hold a wrapped key.
///
/// The identifier carries no key material. Two identities with the same
/// identifier are the same recipient as far as an envelope is concerned.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(String);

impl RecipientId {
    /// Create a recipient identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecipientId({})", self.0)
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecipientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecipientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecipientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&RecipientId> for RecipientId {
    fn from(id: &RecipientId) -> Self {
        id.clone()
    }
}

/// Short digest of a public key, for display and comparison only.
///
/// Never used in a security decision.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub [u8; 8]);

impl Fingerprint {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Convert to plain hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

impl fmt::Display for Fingerprint {
    /// Colon-separated lowercase hex, e.g. `3f:a0:12:9c:47:be:01:d2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_id_display() {
        let id = RecipientId::new("alice");
        assert_eq!(id.to_string(), "alice");
        assert_eq!(format!("{:?}", id), "RecipientId(alice)");
    }

    #[test]
    fn test_recipient_id_serializes_as_plain_string() {
        let id = RecipientId::from("bob");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bob\"");

        let back: RecipientId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_recipient_ids_order_lexically() {
        let mut ids = vec![
            RecipientId::from("carol"),
            RecipientId::from("alice"),
            RecipientId::from("bob"),
        ];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(RecipientId::as_str).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_fingerprint_display() {
        let fp = Fingerprint::from_bytes([0x3f, 0xa0, 0x12, 0x9c, 0x47, 0xbe, 0x01, 0xd2]);
        assert_eq!(fp.to_string(), "3f:a0:12:9c:47:be:01:d2");
        assert_eq!(fp.to_hex(), "3fa0129c47be01d2");
        assert_eq!(format!("{:?}", fp), "Fingerprint(3f:a0:12:9c:47:be:01:d2)");
    }

    #[test]
    fn test_fingerprint_display_keeps_leading_zeros() {
        let fp = Fingerprint::from_bytes([0x00, 0x01, 0x0a, 0x00, 0xff, 0x10, 0x00, 0x00]);
        assert_eq!(fp.to_string(), "00:01:0a:00:ff:10:00:00");
    }
}
