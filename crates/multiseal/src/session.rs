//! The Session: one place to seal, open and share envelopes.
//!
//! A session keeps the attempt ledger for everything opened through it.
//! Envelopes themselves are plain values; the session never holds on to
//! them.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use multiseal_core::{PublicKey, RecipientId, DEFAULT_KEY_BITS};
use multiseal_envelope::{
    grant_access, has_access, recover, revoke_access, revoke_and_rekey, seal, AttemptLedger,
    AttemptRecord, DecryptionResult, Envelope,
};
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::identity::{Contact, Identity};

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RSA modulus size for generated identities.
    pub key_bits: usize,
    /// Whether `open` appends to the attempt ledger.
    pub record_attempts: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            record_attempts: true,
        }
    }
}

/// The main Session struct.
///
/// Provides a unified API for:
/// - Sealing payloads for a set of contacts
/// - Opening envelopes as an identity
/// - Granting and revoking access
/// - Keeping a record of open attempts
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    ledger: Mutex<AttemptLedger>,
}

impl Session {
    /// Create a new session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ledger: Mutex::new(AttemptLedger::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Generate an identity using this session's key size.
    pub fn generate_identity(
        &self,
        id: impl Into<RecipientId>,
        display_name: impl Into<String>,
    ) -> Result<Identity> {
        Identity::generate(id, display_name, &self.config)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sealing and Opening
    // ─────────────────────────────────────────────────────────────────────────

    /// Seal `plaintext` for `recipients`, in order.
    pub fn seal(
        &self,
        plaintext: &str,
        recipients: &[Contact],
        created_by: Option<&Identity>,
    ) -> Result<Envelope> {
        let envelope = seal(
            plaintext,
            recipients.iter().map(|c| (c.id.clone(), &c.public_key)),
            created_by.map(|i| i.id().clone()),
        )?;
        Ok(envelope)
    }

    /// Open `envelope` as `identity`.
    ///
    /// Never fails; the outcome says whether the payload came back and,
    /// if not, why.
    pub fn open(&self, envelope: &Envelope, identity: &Identity) -> DecryptionResult {
        let outcome = recover(envelope, identity.id(), identity.private_key());
        self.record(&outcome, identity.display_name());
        outcome
    }

    /// [`Session::seal`] on the blocking thread pool.
    pub async fn seal_offloaded(
        &self,
        plaintext: String,
        recipients: Vec<Contact>,
        created_by: Option<&Identity>,
    ) -> Result<Envelope> {
        let created_by = created_by.map(|i| i.id().clone());
        let envelope = tokio::task::spawn_blocking(move || {
            seal(
                &plaintext,
                recipients.iter().map(|c| (c.id.clone(), &c.public_key)),
                created_by,
            )
        })
        .await
        .map_err(|e| SessionError::Worker(e.to_string()))??;
        Ok(envelope)
    }

    /// [`Session::open`] on the blocking thread pool.
    pub async fn open_offloaded(
        &self,
        envelope: Envelope,
        identity: Identity,
    ) -> Result<DecryptionResult> {
        let display_name = identity.display_name().to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            recover(&envelope, identity.id(), identity.private_key())
        })
        .await
        .map_err(|e| SessionError::Worker(e.to_string()))?;

        self.record(&outcome, &display_name);
        Ok(outcome)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Give `contact` access using `via`'s credential.
    pub fn grant(&self, envelope: &Envelope, contact: &Contact, via: &Identity) -> Result<Envelope> {
        let next = grant_access(
            envelope,
            &contact.id,
            &contact.public_key,
            via.id(),
            via.private_key(),
        )?;
        Ok(next)
    }

    /// Drop `id` from the recipient list.
    ///
    /// The ciphertext and content key are unchanged, so a copy of the old
    /// wrapped key still opens the payload. Use
    /// [`Session::revoke_and_rekey`] when that matters.
    pub fn revoke(&self, envelope: &Envelope, id: &RecipientId) -> Envelope {
        revoke_access(envelope, id)
    }

    /// Drop `id` and re-seal under a fresh key for the remaining
    /// recipients, whose public keys come from `contacts`.
    pub fn revoke_and_rekey(
        &self,
        envelope: &Envelope,
        id: &RecipientId,
        via: &Identity,
        contacts: &[Contact],
    ) -> Result<Envelope> {
        let directory: BTreeMap<RecipientId, PublicKey> = contacts
            .iter()
            .map(|c| (c.id.clone(), c.public_key.clone()))
            .collect();
        let next = revoke_and_rekey(envelope, id, via.id(), via.private_key(), &directory)?;
        Ok(next)
    }

    pub fn has_access(&self, envelope: &Envelope, id: &RecipientId) -> bool {
        has_access(envelope, id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attempt Ledger
    // ─────────────────────────────────────────────────────────────────────────

    /// Snapshot of recorded attempts, oldest first.
    pub fn attempts(&self) -> Vec<AttemptRecord> {
        self.lock_ledger().all().to_vec()
    }

    fn record(&self, outcome: &DecryptionResult, display_name: &str) {
        if !self.config.record_attempts {
            return;
        }
        let mut ledger = self.lock_ledger();
        ledger.record(outcome, display_name);
        debug!(
            recipient = %outcome.recipient_id,
            success = outcome.success,
            attempts = ledger.len(),
            "recorded attempt"
        );
    }

    fn lock_ledger(&self) -> MutexGuard<'_, AttemptLedger> {
        // A panic while holding the lock cannot leave a half-written record.
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }
}
