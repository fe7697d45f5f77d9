//! Envelope construction.
//!
//! Sealing generates a fresh content key and IV, encrypts the payload once,
//! then wraps the content key for every recipient. Either every recipient
//! is wrapped or nothing is returned.

use std::collections::BTreeMap;

use multiseal_core::{Iv, PublicKey, RecipientId, SymmetricKey};
use tracing::debug;
use zeroize::Zeroizing;

use crate::envelope::{Envelope, EnvelopeMetadata};
use crate::error::{EnvelopeError, Result};

/// Builder for sealing a payload to several recipients.
///
/// Recipients keep the order they were added in. Adding the same id twice
/// keeps its first position and the later key.
pub struct EnvelopeBuilder<'a> {
    plaintext: Zeroizing<String>,
    recipients: Vec<(RecipientId, &'a PublicKey)>,
    created_by: Option<RecipientId>,
}

impl<'a> EnvelopeBuilder<'a> {
    /// Start building an envelope for `plaintext`.
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self {
            plaintext: Zeroizing::new(plaintext.into()),
            recipients: Vec::new(),
            created_by: None,
        }
    }

    /// Add a recipient.
    pub fn recipient(mut self, id: impl Into<RecipientId>, public_key: &'a PublicKey) -> Self {
        self.recipients.push((id.into(), public_key));
        self
    }

    /// Add several recipients.
    pub fn recipients<I>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = (RecipientId, &'a PublicKey)>,
    {
        self.recipients.extend(recipients);
        self
    }

    /// Record who sealed the envelope.
    pub fn created_by(mut self, id: impl Into<RecipientId>) -> Self {
        self.created_by = Some(id.into());
        self
    }

    /// Seal the envelope under a fresh key and IV.
    pub fn build(self) -> Result<Envelope> {
        let key = SymmetricKey::generate();
        let iv = Iv::generate();
        assemble(
            self.plaintext.as_bytes(),
            self.recipients,
            self.created_by,
            &key,
            iv,
        )
    }
}

/// Seal `plaintext` for every `(id, public_key)` pair.
///
/// An empty recipient set is allowed and produces an envelope nobody can
/// open.
pub fn seal<'a, I>(plaintext: &str, recipients: I, created_by: Option<RecipientId>) -> Result<Envelope>
where
    I: IntoIterator<Item = (RecipientId, &'a PublicKey)>,
{
    let mut builder = EnvelopeBuilder::new(plaintext).recipients(recipients);
    builder.created_by = created_by;
    builder.build()
}

/// Encrypt and wrap with a caller-supplied key and IV.
///
/// Callers must pass a key/IV pair that has never been used before.
pub(crate) fn assemble<'a, I>(
    plaintext: &[u8],
    recipients: I,
    created_by: Option<RecipientId>,
    key: &SymmetricKey,
    iv: Iv,
) -> Result<Envelope>
where
    I: IntoIterator<Item = (RecipientId, &'a PublicKey)>,
{
    let ciphertext = key.encrypt(plaintext, &iv)?;

    let mut wrapped_keys = BTreeMap::new();
    let mut authorized_recipients = Vec::new();

    for (id, public_key) in recipients {
        let wrapped = public_key
            .wrap_key(key)
            .map_err(|e| EnvelopeError::BuildFailed {
                recipient: id.clone(),
                reason: e.to_string(),
            })?;

        if wrapped_keys.insert(id.clone(), wrapped).is_none() {
            authorized_recipients.push(id);
        }
    }

    debug!(
        recipients = authorized_recipients.len(),
        ciphertext_len = ciphertext.len(),
        "sealed envelope"
    );

    Ok(Envelope {
        ciphertext,
        iv,
        wrapped_keys,
        authorized_recipients,
        metadata: EnvelopeMetadata::now(created_by),
    })
}
