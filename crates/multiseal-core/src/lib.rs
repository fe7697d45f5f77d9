//! # Multiseal Core
//!
//! Pure primitives for Multiseal: key pairs, key wrapping, bulk encryption,
//! fingerprints and the string encodings used by envelope records.
//!
//! This crate contains no protocol logic. It knows how to encrypt a payload
//! under a symmetric key and how to wrap that key for one RSA public key,
//! but nothing about recipients, access lists or envelopes.
//!
//! ## Key Types
//!
//! - [`KeyPair`] - An RSA key pair owned by one identity
//! - [`PublicKey`] / [`PrivateKey`] - The two halves, with PEM encodings
//! - [`SymmetricKey`] - A 256-bit AES key, zeroized on drop
//! - [`Iv`] - A 128-bit CBC initialization vector
//! - [`WrappedKey`] - A symmetric key encrypted under one public key
//! - [`RecipientId`] - Opaque name of a party, distinct from key material
//! - [`Fingerprint`] - Short display digest of a public key
//!
//! ## Algorithms
//!
//! Bulk data uses AES-256-CBC with PKCS#7 padding. Keys are wrapped with
//! RSA-OAEP (SHA-256). Neither layer authenticates the ciphertext.

pub mod crypto;
pub mod encoding;
pub mod error;
pub mod types;

pub use crypto::{
    Iv, KeyPair, PrivateKey, PublicKey, SymmetricKey, WrappedKey, DEFAULT_KEY_BITS, IV_LEN,
    MIN_KEY_BITS, SYMMETRIC_KEY_LEN,
};
pub use error::{CoreError, Result};
pub use types::{Fingerprint, RecipientId};
