//! # Multiseal Envelope
//!
//! Multi-recipient hybrid encryption envelopes.
//!
//! ## Overview
//!
//! A payload is encrypted once under a fresh AES-256 content key. The
//! content key is then wrapped separately under each recipient's RSA public
//! key. Any listed recipient recovers the payload with their own private
//! key; no shared secret is ever stored in the clear.
//!
//! ## Components
//!
//! - **Builder** ([`EnvelopeBuilder`], [`seal`]): fresh key and IV, one
//!   encryption, one wrap per recipient. Fails atomically.
//! - **Reader** ([`recover`]): authorization check, key unwrap, payload
//!   decrypt. Reports a [`DecryptionResult`] instead of erroring.
//! - **Access** ([`grant_access`], [`revoke_access`], [`has_access`],
//!   [`revoke_and_rekey`]): edit the recipient set without touching the
//!   ciphertext, or re-seal when revocation must be cryptographic.
//! - **Ledger** ([`AttemptLedger`]): append-only record of attempts, owned
//!   by the caller.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use multiseal_core::KeyPair;
//! use multiseal_envelope::{grant_access, recover, revoke_access, EnvelopeBuilder};
//!
//! let alice = KeyPair::generate().unwrap();
//! let bob = KeyPair::generate().unwrap();
//! let carol = KeyPair::generate().unwrap();
//!
//! let envelope = EnvelopeBuilder::new("secret-42")
//!     .recipient("alice", alice.public_key())
//!     .recipient("bob", bob.public_key())
//!     .build()
//!     .unwrap();
//!
//! let result = recover(&envelope, &"alice".into(), alice.private_key());
//! assert_eq!(result.plaintext(), Some("secret-42"));
//!
//! let envelope = grant_access(
//!     &envelope,
//!     &"carol".into(),
//!     carol.public_key(),
//!     &"alice".into(),
//!     alice.private_key(),
//! )
//! .unwrap();
//! let envelope = revoke_access(&envelope, &"bob".into());
//! ```
//!
//! ## Integrity
//!
//! Neither the ciphertext nor the recipient list is authenticated. Decoding
//! rejects records whose list and key set disagree, but a consistent edit
//! goes unnoticed.

pub mod access;
pub mod builder;
pub mod envelope;
pub mod error;
pub mod ledger;
pub mod reader;

pub use access::{grant_access, has_access, revoke_access, revoke_and_rekey};
pub use builder::{seal, EnvelopeBuilder};
pub use envelope::{Envelope, EnvelopeMetadata, EnvelopeSummary, RecipientSummary, ALGORITHM_LABEL};
pub use error::{EnvelopeError, ErrorKind, Result};
pub use ledger::{AttemptLedger, AttemptRecord};
pub use reader::{open, recover, DecryptionResult};

#[cfg(test)]
pub(crate) mod test_keys {
    use std::sync::OnceLock;

    use multiseal_core::{KeyPair, MIN_KEY_BITS};

    macro_rules! cached_key {
        ($name:ident, $bits:expr) => {
            pub fn $name() -> &'static KeyPair {
                static KEY: OnceLock<KeyPair> = OnceLock::new();
                KEY.get_or_init(|| KeyPair::generate_with_bits($bits).unwrap())
            }
        };
    }

    cached_key!(alice, 2048);
    cached_key!(bob, 2048);
    cached_key!(carol, 2048);
    cached_key!(tiny, MIN_KEY_BITS);
}
