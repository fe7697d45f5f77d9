//! Envelope recovery.
//!
//! Recovery runs three checks in order: the recipient must hold a wrapped
//! key, the wrapped key must open with the supplied private key, and the
//! payload must decrypt under the recovered key. The first failing check
//! decides the reported [`ErrorKind`]. Expected failures never surface as
//! `Err` or a panic; they come back as a [`DecryptionResult`].

use std::fmt;

use multiseal_core::{PrivateKey, RecipientId, SymmetricKey};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::envelope::Envelope;
use crate::error::{EnvelopeError, ErrorKind, Result};

/// Outcome of one recovery attempt.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptionResult {
    pub success: bool,

    /// Present only on success.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub plaintext: Option<String>,

    /// Present only on failure.
    pub error: Option<ErrorKind>,

    /// The identity the attempt was made as.
    pub recipient_id: RecipientId,
}

impl DecryptionResult {
    /// A successful recovery.
    pub fn granted(recipient_id: RecipientId, plaintext: String) -> Self {
        Self {
            success: true,
            plaintext: Some(plaintext),
            error: None,
            recipient_id,
        }
    }

    /// A failed recovery.
    pub fn denied(recipient_id: RecipientId, error: ErrorKind) -> Self {
        Self {
            success: false,
            plaintext: None,
            error: Some(error),
            recipient_id,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error
    }

    /// The recovered plaintext, if any.
    pub fn plaintext(&self) -> Option<&str> {
        self.plaintext.as_deref()
    }

    pub fn into_plaintext(self) -> Option<String> {
        self.plaintext
    }
}

impl fmt::Debug for DecryptionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptionResult")
            .field("success", &self.success)
            .field("plaintext", &self.plaintext.as_ref().map(|_| "<redacted>"))
            .field("error", &self.error)
            .field("recipient_id", &self.recipient_id)
            .finish()
    }
}

/// Attempt to recover the plaintext as `recipient_id`.
pub fn recover(
    envelope: &Envelope,
    recipient_id: &RecipientId,
    private_key: &PrivateKey,
) -> DecryptionResult {
    match open(envelope, recipient_id, private_key) {
        Ok(plaintext) => {
            debug!(recipient = %recipient_id, "envelope opened");
            DecryptionResult::granted(recipient_id.clone(), plaintext)
        }
        Err(e) => {
            warn!(recipient = %recipient_id, error = %e, "envelope open failed");
            let kind = e.kind().unwrap_or(ErrorKind::PayloadDecryptionFailed);
            DecryptionResult::denied(recipient_id.clone(), kind)
        }
    }
}

/// Like [`recover`], but returning the typed error.
pub fn open(
    envelope: &Envelope,
    recipient_id: &RecipientId,
    private_key: &PrivateKey,
) -> Result<String> {
    let key = recover_key(envelope, recipient_id, private_key)?;
    let plaintext = decrypt_payload(envelope, &key)?;
    Ok(plaintext.to_string())
}

/// Authorization check and key unwrap. Does not touch the payload.
pub(crate) fn recover_key(
    envelope: &Envelope,
    recipient_id: &RecipientId,
    private_key: &PrivateKey,
) -> Result<SymmetricKey> {
    let wrapped = envelope
        .wrapped_keys
        .get(recipient_id)
        .ok_or_else(|| EnvelopeError::AccessDenied(recipient_id.clone()))?;

    private_key
        .unwrap_key(wrapped)
        .map_err(|e| EnvelopeError::KeyRecoveryFailed {
            recipient: recipient_id.clone(),
            reason: e.to_string(),
        })
}

/// Decrypt the payload with an already recovered key.
pub(crate) fn decrypt_payload(
    envelope: &Envelope,
    key: &SymmetricKey,
) -> Result<Zeroizing<String>> {
    let bytes = key
        .decrypt(&envelope.ciphertext, &envelope.iv)
        .map_err(|e| EnvelopeError::PayloadDecryptionFailed(e.to_string()))?;

    String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
        EnvelopeError::PayloadDecryptionFailed(format!("payload is not valid UTF-8: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{assemble, EnvelopeBuilder};
    use crate::test_keys::{alice, bob, carol};
    use multiseal_core::Iv;

    fn envelope() -> Envelope {
        EnvelopeBuilder::new("secret-42")
            .recipient("alice", alice().public_key())
            .recipient("bob", bob().public_key())
            .build()
            .unwrap()
    }

    #[test]
    fn test_authorized_recipient_recovers() {
        let result = recover(&envelope(), &"alice".into(), alice().private_key());

        assert!(result.is_success());
        assert_eq!(result.plaintext(), Some("secret-42"));
        assert_eq!(result.error_kind(), None);
        assert_eq!(result.recipient_id, RecipientId::from("alice"));
    }

    #[test]
    fn test_unlisted_recipient_denied() {
        let result = recover(&envelope(), &"carol".into(), carol().private_key());

        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some(ErrorKind::AccessDenied));
        assert_eq!(result.plaintext(), None);
        assert_eq!(result.recipient_id, RecipientId::from("carol"));
    }

    #[test]
    fn test_wrong_private_key_fails_recovery() {
        let result = recover(&envelope(), &"alice".into(), bob().private_key());

        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some(ErrorKind::KeyRecoveryFailed));
        assert_eq!(result.plaintext(), None);
    }

    #[test]
    fn test_corrupted_ciphertext_fails_payload() {
        let mut env = envelope();
        env.ciphertext.truncate(env.ciphertext.len() - 3);

        let result = recover(&env, &"alice".into(), alice().private_key());
        assert_eq!(result.error_kind(), Some(ErrorKind::PayloadDecryptionFailed));
    }

    #[test]
    fn test_swapped_iv_never_yields_plaintext() {
        let mut env = envelope();
        env.iv = Iv::generate();

        // A foreign IV garbles the first block. Padding may or may not
        // validate, but the plaintext must never come back.
        let result = recover(&env, &"alice".into(), alice().private_key());
        assert_ne!(result.plaintext(), Some("secret-42"));
    }

    #[test]
    fn test_non_utf8_payload_fails_decryption() {
        let env = assemble(
            &[0xff, 0xfe, 0x00],
            [(RecipientId::from("alice"), alice().public_key())],
            None,
            &SymmetricKey::generate(),
            Iv::generate(),
        )
        .unwrap();

        let result = recover(&env, &"alice".into(), alice().private_key());
        assert!(!result.is_success());
        assert_eq!(result.error_kind(), Some(ErrorKind::PayloadDecryptionFailed));
        assert_eq!(result.plaintext(), None);

        let err = open(&env, &"alice".into(), alice().private_key()).unwrap_err();
        assert!(matches!(err, EnvelopeError::PayloadDecryptionFailed(_)));
    }

    #[test]
    fn test_open_returns_typed_error() {
        let err = open(&envelope(), &"carol".into(), carol().private_key()).unwrap_err();
        assert!(matches!(err, EnvelopeError::AccessDenied(ref id) if id.as_str() == "carol"));
    }

    #[test]
    fn test_result_debug_redacts_plaintext() {
        let result = recover(&envelope(), &"bob".into(), bob().private_key());
        let debug = format!("{:?}", result);
        assert!(!debug.contains("secret-42"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_result_json_omits_missing_plaintext() {
        let denied = DecryptionResult::denied("carol".into(), ErrorKind::AccessDenied);
        let json = serde_json::to_string(&denied).unwrap();
        assert!(!json.contains("plaintext"));
        assert!(json.contains("AccessDenied"));
    }
}
