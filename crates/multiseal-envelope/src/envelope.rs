//! The envelope record.
//!
//! An envelope is one AES-encrypted payload plus one RSA-wrapped copy of
//! the content key per authorized recipient. It is a value: the access
//! manager never edits an envelope in place, it returns a new one.
//!
//! The core invariant is that the key set of `wrapped_keys` and the
//! `authorized_recipients` list name exactly the same recipients. Decoding
//! rejects records that break it.

use std::collections::{BTreeMap, BTreeSet};

use multiseal_core::encoding::{base64_bytes, preview, to_base64};
use multiseal_core::{Iv, RecipientId, WrappedKey};
use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, Result};

/// Label stored in every envelope's metadata.
pub const ALGORITHM_LABEL: &str = "AES-256-CBC+RSA-OAEP-SHA256";

/// Descriptive metadata. Not bound to the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMetadata {
    /// Creation time (Unix milliseconds).
    pub created_at: i64,

    /// Who sealed the envelope, if recorded.
    pub created_by: Option<RecipientId>,

    /// Algorithms used for the payload and key wrapping.
    pub algorithm_label: String,
}

impl EnvelopeMetadata {
    pub(crate) fn now(created_by: Option<RecipientId>) -> Self {
        Self {
            created_at: now_millis(),
            created_by,
            algorithm_label: ALGORITHM_LABEL.to_string(),
        }
    }
}

/// A multi-recipient encrypted envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub struct Envelope {
    /// Payload encrypted once under the content key.
    #[serde(with = "base64_bytes")]
    pub(crate) ciphertext: Vec<u8>,

    /// IV paired with `ciphertext`.
    pub(crate) iv: Iv,

    /// Content key wrapped per recipient.
    pub(crate) wrapped_keys: BTreeMap<RecipientId, WrappedKey>,

    /// Recipients in grant order.
    pub(crate) authorized_recipients: Vec<RecipientId>,

    pub(crate) metadata: EnvelopeMetadata,
}

/// Wire shape of an envelope before invariant checks.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(with = "base64_bytes")]
    ciphertext: Vec<u8>,
    iv: Iv,
    wrapped_keys: BTreeMap<RecipientId, WrappedKey>,
    authorized_recipients: Vec<RecipientId>,
    metadata: EnvelopeMetadata,
}

impl TryFrom<RawEnvelope> for Envelope {
    type Error = EnvelopeError;

    fn try_from(raw: RawEnvelope) -> Result<Self> {
        let envelope = Envelope {
            ciphertext: raw.ciphertext,
            iv: raw.iv,
            wrapped_keys: raw.wrapped_keys,
            authorized_recipients: raw.authorized_recipients,
            metadata: raw.metadata,
        };

        if !envelope.is_consistent() {
            return Err(EnvelopeError::SerializationError(
                "authorized_recipients does not match wrapped_keys".to_string(),
            ));
        }

        Ok(envelope)
    }
}

impl Envelope {
    /// The encrypted payload.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// The IV used for the payload.
    pub fn iv(&self) -> &Iv {
        &self.iv
    }

    /// All wrapped keys, keyed by recipient.
    pub fn wrapped_keys(&self) -> &BTreeMap<RecipientId, WrappedKey> {
        &self.wrapped_keys
    }

    /// The wrapped key for one recipient.
    pub fn wrapped_key(&self, id: &RecipientId) -> Option<&WrappedKey> {
        self.wrapped_keys.get(id)
    }

    /// Authorized recipients in grant order.
    pub fn authorized_recipients(&self) -> &[RecipientId] {
        &self.authorized_recipients
    }

    /// Envelope metadata.
    pub fn metadata(&self) -> &EnvelopeMetadata {
        &self.metadata
    }

    /// Number of authorized recipients.
    pub fn recipient_count(&self) -> usize {
        self.authorized_recipients.len()
    }

    /// Whether `id` is authorized in both the list and the key set.
    pub fn has_access(&self, id: &RecipientId) -> bool {
        crate::access::has_access(self, id)
    }

    /// Whether the recipient list and the wrapped key set agree.
    pub fn is_consistent(&self) -> bool {
        let listed: BTreeSet<&RecipientId> = self.authorized_recipients.iter().collect();

        listed.len() == self.authorized_recipients.len()
            && listed.len() == self.wrapped_keys.len()
            && self.wrapped_keys.keys().all(|id| listed.contains(id))
    }

    /// Encode as a JSON record with Base64 binary fields.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| EnvelopeError::SerializationError(e.to_string()))
    }

    /// Decode a JSON record, checking the recipient invariant.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| EnvelopeError::SerializationError(e.to_string()))
    }

    /// Encode as CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| EnvelopeError::SerializationError(e.to_string()))?;
        Ok(buf)
    }

    /// Decode CBOR bytes, checking the recipient invariant.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| EnvelopeError::SerializationError(e.to_string()))
    }

    /// A display view with long binary fields cut to `max_chars`.
    pub fn summary(&self, max_chars: usize) -> EnvelopeSummary {
        let recipients = self
            .authorized_recipients
            .iter()
            .map(|id| RecipientSummary {
                id: id.clone(),
                wrapped_key: self
                    .wrapped_keys
                    .get(id)
                    .map(|w| preview(&to_base64(w.as_bytes()), max_chars))
                    .unwrap_or_default(),
            })
            .collect();

        EnvelopeSummary {
            ciphertext: preview(&to_base64(&self.ciphertext), max_chars),
            ciphertext_len: self.ciphertext.len(),
            iv: self.iv.to_hex(),
            recipients,
            created_at: self.metadata.created_at,
            created_by: self.metadata.created_by.clone(),
            algorithm_label: self.metadata.algorithm_label.clone(),
        }
    }
}

/// Display-oriented view of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeSummary {
    /// Truncated Base64 ciphertext.
    pub ciphertext: String,
    /// Full ciphertext length in bytes.
    pub ciphertext_len: usize,
    /// Hex IV.
    pub iv: String,
    pub recipients: Vec<RecipientSummary>,
    pub created_at: i64,
    pub created_by: Option<RecipientId>,
    pub algorithm_label: String,
}

/// One recipient line of an [`EnvelopeSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientSummary {
    pub id: RecipientId,
    /// Truncated Base64 wrapped key.
    pub wrapped_key: String,
}

/// Get current time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
