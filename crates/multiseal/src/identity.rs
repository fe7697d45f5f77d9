//! Identities and contacts.
//!
//! An [`Identity`] is the credential a party holds: its id, a display name
//! and its private key. A [`Contact`] is the public half, safe to hand to
//! anyone who wants to seal something for that party.

use multiseal_core::{Fingerprint, KeyPair, PrivateKey, PublicKey, RecipientId};

use crate::error::Result;
use crate::session::SessionConfig;

/// A party's in-memory credential.
#[derive(Debug, Clone)]
pub struct Identity {
    id: RecipientId,
    display_name: String,
    key_pair: KeyPair,
}

impl Identity {
    /// Generate a fresh identity with the configured key size.
    pub fn generate(
        id: impl Into<RecipientId>,
        display_name: impl Into<String>,
        config: &SessionConfig,
    ) -> Result<Self> {
        let key_pair = KeyPair::generate_with_bits(config.key_bits)?;
        Ok(Self::from_key_pair(id, display_name, key_pair))
    }

    /// Wrap an existing key pair.
    pub fn from_key_pair(
        id: impl Into<RecipientId>,
        display_name: impl Into<String>,
        key_pair: KeyPair,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            key_pair,
        }
    }

    /// Load an identity from a PKCS#8 PEM private key.
    pub fn from_private_pem(
        id: impl Into<RecipientId>,
        display_name: impl Into<String>,
        pem: &str,
    ) -> Result<Self> {
        let key_pair = KeyPair::from_private_pem(pem)?;
        Ok(Self::from_key_pair(id, display_name, key_pair))
    }

    pub fn id(&self) -> &RecipientId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn public_key(&self) -> &PublicKey {
        self.key_pair.public_key()
    }

    pub fn private_key(&self) -> &PrivateKey {
        self.key_pair.private_key()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.key_pair.fingerprint()
    }

    /// The shareable public half of this identity.
    pub fn contact(&self) -> Contact {
        Contact {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            public_key: self.key_pair.public_key().clone(),
            fingerprint: self.key_pair.fingerprint(),
        }
    }
}

/// Public information about a party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: RecipientId,
    pub display_name: String,
    pub public_key: PublicKey,
    pub fingerprint: Fingerprint,
}

impl Contact {
    /// Build a contact from a public key, computing its fingerprint.
    pub fn new(
        id: impl Into<RecipientId>,
        display_name: impl Into<String>,
        public_key: PublicKey,
    ) -> Self {
        let fingerprint = public_key.fingerprint();
        Self {
            id: id.into(),
            display_name: display_name.into(),
            public_key,
            fingerprint,
        }
    }

    /// Load a contact from an SPKI PEM public key.
    pub fn from_pem(
        id: impl Into<RecipientId>,
        display_name: impl Into<String>,
        pem: &str,
    ) -> Result<Self> {
        Ok(Self::new(id, display_name, PublicKey::from_pem(pem)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use multiseal_envelope::ErrorKind;
    use multiseal_testkit::fixtures::{alice, bob};

    fn alice_identity() -> Identity {
        let party = alice();
        Identity::from_key_pair(party.id.clone(), &party.display_name, party.key_pair.clone())
    }

    #[test]
    fn test_contact_matches_identity() {
        let identity = alice_identity();
        let contact = identity.contact();

        assert_eq!(contact.id, *identity.id());
        assert_eq!(contact.display_name, "Alice");
        assert_eq!(&contact.public_key, identity.public_key());
        assert_eq!(contact.fingerprint, identity.fingerprint());
    }

    #[test]
    fn test_contact_from_pem() {
        let pem = bob().public_key().to_pem().unwrap();
        let contact = Contact::from_pem("bob", "Bob", &pem).unwrap();

        assert_eq!(&contact.public_key, bob().public_key());
        assert_eq!(contact.fingerprint, bob().key_pair.fingerprint());
    }

    #[test]
    fn test_identity_from_private_pem() {
        let pem = alice().private_key().to_pem().unwrap();
        let identity = Identity::from_private_pem("alice", "Alice", &pem).unwrap();

        assert_eq!(identity.fingerprint(), alice().key_pair.fingerprint());
    }

    #[test]
    fn test_generate_rejects_tiny_keys() {
        let config = SessionConfig {
            key_bits: 256,
            ..SessionConfig::default()
        };
        let err = Identity::generate("mallory", "Mallory", &config).unwrap_err();

        assert!(matches!(err, SessionError::Envelope(_)));
        assert_eq!(err.kind(), Some(ErrorKind::KeyGenerationFailed));
    }

    #[test]
    fn test_bad_pem_is_rejected() {
        assert!(Contact::from_pem("x", "X", "not a pem").is_err());
        assert!(Identity::from_private_pem("x", "X", "not a pem").is_err());
    }
}
