//! Error types for sessions.

use multiseal_core::CoreError;
use multiseal_envelope::{EnvelopeError, ErrorKind};
use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Envelope error.
    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Offloaded work panicked or was cancelled.
    #[error("worker failed: {0}")]
    Worker(String),
}

impl SessionError {
    /// The envelope failure class, if there is one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SessionError::Envelope(e) => e.kind(),
            SessionError::Worker(_) => None,
        }
    }
}

impl From<CoreError> for SessionError {
    fn from(e: CoreError) -> Self {
        SessionError::Envelope(e.into())
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
