//! Test fixtures and helpers.
//!
//! A fixed cast of five parties, each with an RSA-2048 key pair generated
//! on first use and shared for the rest of the process.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use multiseal_core::{KeyPair, PrivateKey, PublicKey, RecipientId};
use multiseal_envelope::{Envelope, EnvelopeBuilder};

/// A named party with a key pair.
pub struct Party {
    pub id: RecipientId,
    pub display_name: String,
    pub key_pair: KeyPair,
}

impl Party {
    /// Generate a party with a fresh RSA-2048 key pair.
    pub fn generate(id: &str, display_name: &str) -> Self {
        Self {
            id: RecipientId::from(id),
            display_name: display_name.to_string(),
            key_pair: KeyPair::generate().expect("RSA key generation failed"),
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        self.key_pair.public_key()
    }

    pub fn private_key(&self) -> &PrivateKey {
        self.key_pair.private_key()
    }
}

macro_rules! cast_member {
    ($fn_name:ident, $id:expr, $display:expr) => {
        /// Shared fixture party.
        pub fn $fn_name() -> &'static Party {
            static PARTY: OnceLock<Party> = OnceLock::new();
            PARTY.get_or_init(|| Party::generate($id, $display))
        }
    };
}

cast_member!(alice, "alice", "Alice");
cast_member!(bob, "bob", "Bob");
cast_member!(carol, "carol", "Carol");
cast_member!(dave, "dave", "Dave");
cast_member!(eve, "eve", "Eve");

/// The whole cast, in a fixed order.
pub fn cast() -> [&'static Party; 5] {
    [alice(), bob(), carol(), dave(), eve()]
}

/// Seal `plaintext` for `parties`, in order, with the first as creator.
pub fn seal_for(plaintext: &str, parties: &[&Party]) -> Envelope {
    let mut builder = EnvelopeBuilder::new(plaintext)
        .recipients(parties.iter().map(|p| (p.id.clone(), p.public_key())));
    if let Some(first) = parties.first() {
        builder = builder.created_by(first.id.clone());
    }
    builder.build().expect("sealing for fixture parties failed")
}

/// Public key directory for `parties`.
pub fn directory(parties: &[&Party]) -> BTreeMap<RecipientId, PublicKey> {
    parties
        .iter()
        .map(|p| (p.id.clone(), p.public_key().clone()))
        .collect()
}
