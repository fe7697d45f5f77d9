//! # Multiseal
//!
//! Multi-recipient hybrid encryption: encrypt a payload once, let several
//! parties open it, and change who can open it later.
//!
//! ## Overview
//!
//! - **Envelopes**: AES-256-CBC ciphertext plus one RSA-OAEP wrapped copy of
//!   the content key per recipient
//! - **Identities**: a party's id, display name and key pair; the public
//!   half is a [`Contact`]
//! - **Sessions**: seal, open, grant and revoke, with a ledger of every
//!   open attempt
//!
//! ## Usage
//!
//! ```rust,no_run
//! use multiseal::{Session, SessionConfig};
//!
//! let session = Session::new(SessionConfig::default());
//! let alice = session.generate_identity("alice", "Alice").unwrap();
//! let bob = session.generate_identity("bob", "Bob").unwrap();
//! let carol = session.generate_identity("carol", "Carol").unwrap();
//!
//! let envelope = session
//!     .seal("secret-42", &[alice.contact(), bob.contact()], Some(&alice))
//!     .unwrap();
//! assert_eq!(session.open(&envelope, &bob).plaintext(), Some("secret-42"));
//!
//! let envelope = session.grant(&envelope, &carol.contact(), &alice).unwrap();
//! let envelope = session.revoke(&envelope, bob.id());
//! assert!(!session.open(&envelope, &bob).is_success());
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `multiseal::core` - Keys, primitives and identifiers
//! - `multiseal::envelope` - Envelope record, builder, reader and access edits

pub mod error;
pub mod identity;
pub mod session;

// Re-export component crates
pub use multiseal_core as core;
pub use multiseal_envelope as envelope;

// Re-export main types for convenience
pub use error::{Result, SessionError};
pub use identity::{Contact, Identity};
pub use session::{Session, SessionConfig};

// Re-export commonly used types
pub use multiseal_core::{Fingerprint, KeyPair, PrivateKey, PublicKey, RecipientId};
pub use multiseal_envelope::{
    AttemptLedger, AttemptRecord, DecryptionResult, Envelope, EnvelopeError, ErrorKind,
};
