//! Error types for the envelope protocol.

use std::fmt;

use multiseal_core::{CoreError, RecipientId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building or editing an envelope.
///
/// The reader does not return these directly; it folds them into a
/// [`DecryptionResult`](crate::DecryptionResult) carrying an [`ErrorKind`].
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Key pair generation failed.
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// The recipient has no wrapped key in this envelope.
    #[error("access denied: {0} is not an authorized recipient")]
    AccessDenied(RecipientId),

    /// The wrapped key could not be recovered with the supplied private key.
    #[error("key recovery failed for {recipient}: {reason}")]
    KeyRecoveryFailed {
        recipient: RecipientId,
        reason: String,
    },

    /// The key was recovered but the payload did not decrypt.
    #[error("payload decryption failed: {0}")]
    PayloadDecryptionFailed(String),

    /// A recipient's public key could not wrap the content key.
    #[error("envelope build failed for {recipient}: {reason}")]
    BuildFailed {
        recipient: RecipientId,
        reason: String,
    },

    /// Encoding or decoding of an envelope record failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Other primitive error.
    #[error("core error: {0}")]
    Core(#[source] CoreError),
}

impl EnvelopeError {
    /// The protocol-level kind of this error, if it has one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            EnvelopeError::KeyGenerationFailed(_) => Some(ErrorKind::KeyGenerationFailed),
            EnvelopeError::AccessDenied(_) => Some(ErrorKind::AccessDenied),
            EnvelopeError::KeyRecoveryFailed { .. } => Some(ErrorKind::KeyRecoveryFailed),
            EnvelopeError::PayloadDecryptionFailed(_) => Some(ErrorKind::PayloadDecryptionFailed),
            EnvelopeError::BuildFailed { .. } => Some(ErrorKind::BuildFailed),
            EnvelopeError::SerializationError(_) | EnvelopeError::Core(_) => None,
        }
    }
}

impl From<CoreError> for EnvelopeError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::KeyGeneration(msg) => EnvelopeError::KeyGenerationFailed(msg),
            other => EnvelopeError::Core(other),
        }
    }
}

/// Protocol error taxonomy, as reported to callers and recorded in the
/// attempt ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    KeyGenerationFailed,
    AccessDenied,
    KeyRecoveryFailed,
    PayloadDecryptionFailed,
    BuildFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::KeyGenerationFailed => "key generation failed",
            ErrorKind::AccessDenied => "access denied",
            ErrorKind::KeyRecoveryFailed => "key recovery failed",
            ErrorKind::PayloadDecryptionFailed => "payload decryption failed",
            ErrorKind::BuildFailed => "build failed",
        };
        f.write_str(s)
    }
}

/// Result type for envelope operations.
pub type Result<T> = std::result::Result<T, EnvelopeError>;
