//! Access list edits.
//!
//! Granting re-wraps the existing content key for a new recipient; the
//! ciphertext and IV are carried over byte for byte. Revoking deletes a
//! recipient's wrapped key and list entry.
//!
//! Revocation is a list edit, not a re-keying. A recipient who kept a copy
//! of their wrapped key (or of an older envelope) can still recover the
//! content key after being revoked. Use [`revoke_and_rekey`] when that
//! matters; it seals the payload again under a fresh key for everyone who
//! remains.
//!
//! All operations return a new [`Envelope`]. Concurrent edits of the same
//! envelope must be serialized by the caller.

use std::collections::BTreeMap;

use multiseal_core::{Iv, PrivateKey, PublicKey, RecipientId, SymmetricKey};
use tracing::debug;

use crate::builder::assemble;
use crate::envelope::Envelope;
use crate::error::{EnvelopeError, Result};
use crate::reader::{decrypt_payload, recover_key};

/// Grant `new_id` access using an existing recipient's credential.
///
/// The content key is recovered through `via_id`/`via_private_key`, the
/// payload is test-decrypted, and the key is wrapped for `new_public_key`.
/// Granting to an id that is already authorized replaces its wrapped key.
pub fn grant_access(
    envelope: &Envelope,
    new_id: &RecipientId,
    new_public_key: &PublicKey,
    via_id: &RecipientId,
    via_private_key: &PrivateKey,
) -> Result<Envelope> {
    let key = recover_key(envelope, via_id, via_private_key)?;
    decrypt_payload(envelope, &key)?;

    let wrapped = new_public_key
        .wrap_key(&key)
        .map_err(|e| EnvelopeError::BuildFailed {
            recipient: new_id.clone(),
            reason: e.to_string(),
        })?;

    let mut next = envelope.clone();
    next.wrapped_keys.insert(new_id.clone(), wrapped);
    if !next.authorized_recipients.contains(new_id) {
        next.authorized_recipients.push(new_id.clone());
    }

    debug!(recipient = %new_id, via = %via_id, "granted access");
    Ok(next)
}

/// Remove `id` from the envelope. A no-op if `id` was never authorized.
pub fn revoke_access(envelope: &Envelope, id: &RecipientId) -> Envelope {
    let mut next = envelope.clone();
    let had_key = next.wrapped_keys.remove(id).is_some();
    next.authorized_recipients.retain(|r| r != id);

    if had_key {
        debug!(recipient = %id, "revoked access");
    }
    next
}

/// Whether `id` is authorized, checked against both the recipient list
/// and the wrapped key set.
pub fn has_access(envelope: &Envelope, id: &RecipientId) -> bool {
    envelope.authorized_recipients.contains(id) && envelope.wrapped_keys.contains_key(id)
}

/// Revoke `id_to_remove` and re-seal the payload under a fresh key and IV.
///
/// The payload is recovered through `via_id`/`via_private_key`. Every
/// remaining recipient needs a public key in `directory`; a missing entry
/// fails the whole operation. The creator is carried over and the creation
/// time is reset.
pub fn revoke_and_rekey(
    envelope: &Envelope,
    id_to_remove: &RecipientId,
    via_id: &RecipientId,
    via_private_key: &PrivateKey,
    directory: &BTreeMap<RecipientId, PublicKey>,
) -> Result<Envelope> {
    let old_key = recover_key(envelope, via_id, via_private_key)?;
    let plaintext = decrypt_payload(envelope, &old_key)?;

    let mut remaining = Vec::with_capacity(envelope.authorized_recipients.len());
    for id in envelope
        .authorized_recipients
        .iter()
        .filter(|id| *id != id_to_remove)
    {
        let public_key = directory
            .get(id)
            .ok_or_else(|| EnvelopeError::BuildFailed {
                recipient: id.clone(),
                reason: "no public key in directory".to_string(),
            })?;
        remaining.push((id.clone(), public_key));
    }

    let next = assemble(
        plaintext.as_bytes(),
        remaining,
        envelope.metadata.created_by.clone(),
        &SymmetricKey::generate(),
        Iv::generate(),
    )?;

    debug!(
        recipient = %id_to_remove,
        remaining = next.recipient_count(),
        "revoked access and re-keyed"
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::EnvelopeBuilder;
    use crate::error::ErrorKind;
    use crate::reader::recover;
    use crate::test_keys::{alice, bob, carol, tiny};

    fn id(s: &str) -> RecipientId {
        RecipientId::from(s)
    }

    fn envelope() -> Envelope {
        EnvelopeBuilder::new("secret-42")
            .recipient("alice", alice().public_key())
            .recipient("bob", bob().public_key())
            .created_by("alice")
            .build()
            .unwrap()
    }

    #[test]
    fn test_grant_preserves_payload_and_adds_recipient() {
        let env = envelope();
        let granted = grant_access(
            &env,
            &id("carol"),
            carol().public_key(),
            &id("alice"),
            alice().private_key(),
        )
        .unwrap();

        assert_eq!(granted.ciphertext(), env.ciphertext());
        assert_eq!(granted.iv(), env.iv());
        assert_eq!(granted.metadata(), env.metadata());
        assert_eq!(
            granted.authorized_recipients(),
            &[id("alice"), id("bob"), id("carol")]
        );
        assert!(granted.is_consistent());

        let result = recover(&granted, &id("carol"), carol().private_key());
        assert_eq!(result.plaintext(), Some("secret-42"));

        // The input is untouched.
        assert!(!has_access(&env, &id("carol")));
    }

    #[test]
    fn test_grant_via_unauthorized_fails() {
        let err = grant_access(
            &envelope(),
            &id("carol"),
            carol().public_key(),
            &id("carol"),
            carol().private_key(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::AccessDenied));
    }

    #[test]
    fn test_grant_via_wrong_key_fails() {
        let err = grant_access(
            &envelope(),
            &id("carol"),
            carol().public_key(),
            &id("alice"),
            bob().private_key(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::KeyRecoveryFailed));
    }

    #[test]
    fn test_grant_with_corrupted_payload_fails_sanity_check() {
        let mut env = envelope();
        env.ciphertext.pop();

        let err = grant_access(
            &env,
            &id("carol"),
            carol().public_key(),
            &id("alice"),
            alice().private_key(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::PayloadDecryptionFailed));
    }

    #[test]
    fn test_grant_with_unusable_key_fails() {
        let err = grant_access(
            &envelope(),
            &id("tiny"),
            tiny().public_key(),
            &id("alice"),
            alice().private_key(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::BuildFailed));
    }

    #[test]
    fn test_regrant_replaces_key_without_duplicating() {
        let env = envelope();
        let regranted = grant_access(
            &env,
            &id("bob"),
            bob().public_key(),
            &id("alice"),
            alice().private_key(),
        )
        .unwrap();

        assert_eq!(regranted.authorized_recipients(), env.authorized_recipients());
        assert_ne!(
            regranted.wrapped_key(&id("bob")),
            env.wrapped_key(&id("bob"))
        );
        assert!(recover(&regranted, &id("bob"), bob().private_key()).is_success());
    }

    #[test]
    fn test_revoke_removes_recipient() {
        let env = envelope();
        let revoked = revoke_access(&env, &id("bob"));

        assert!(!has_access(&revoked, &id("bob")));
        assert_eq!(revoked.authorized_recipients(), &[id("alice")]);
        assert!(revoked.is_consistent());
        assert_eq!(revoked.ciphertext(), env.ciphertext());

        let bob_result = recover(&revoked, &id("bob"), bob().private_key());
        assert_eq!(bob_result.error_kind(), Some(ErrorKind::AccessDenied));
        assert!(recover(&revoked, &id("alice"), alice().private_key()).is_success());
    }

    #[test]
    fn test_revoke_unknown_is_noop() {
        let env = envelope();
        assert_eq!(revoke_access(&env, &id("zed")), env);
    }

    #[test]
    fn test_revoke_leaves_content_key_unchanged() {
        let env = envelope();
        let retained = env.wrapped_key(&id("bob")).unwrap().clone();
        let revoked = revoke_access(&env, &id("bob"));

        // A retained wrapped key still opens the old content key.
        let old_key = bob().private_key().unwrap_key(&retained).unwrap();
        let bytes = old_key.decrypt(revoked.ciphertext(), revoked.iv()).unwrap();
        assert_eq!(bytes, b"secret-42");
    }

    #[test]
    fn test_has_access_requires_both_sides() {
        let mut env = envelope();
        assert!(has_access(&env, &id("alice")));

        env.authorized_recipients.retain(|r| r.as_str() != "alice");
        assert!(!has_access(&env, &id("alice")));

        let mut env = envelope();
        env.wrapped_keys.remove(&id("bob"));
        assert!(!has_access(&env, &id("bob")));
    }

    #[test]
    fn test_rekey_changes_key_and_iv() {
        let env = envelope();
        let directory: BTreeMap<RecipientId, PublicKey> = [
            (id("alice"), alice().public_key().clone()),
            (id("bob"), bob().public_key().clone()),
        ]
        .into_iter()
        .collect();

        let retained = env.wrapped_key(&id("bob")).unwrap().clone();
        let rekeyed =
            revoke_and_rekey(&env, &id("bob"), &id("alice"), alice().private_key(), &directory)
                .unwrap();

        assert_eq!(rekeyed.authorized_recipients(), &[id("alice")]);
        assert_ne!(rekeyed.iv(), env.iv());
        assert_ne!(rekeyed.ciphertext(), env.ciphertext());
        assert_eq!(rekeyed.metadata().created_by, Some(id("alice")));
        assert!(recover(&rekeyed, &id("alice"), alice().private_key()).is_success());

        // The retained key no longer opens the new payload.
        let old_key = bob().private_key().unwrap_key(&retained).unwrap();
        match old_key.decrypt(rekeyed.ciphertext(), rekeyed.iv()) {
            Ok(bytes) => assert_ne!(bytes, b"secret-42"),
            Err(_) => {}
        }
    }

    #[test]
    fn test_rekey_requires_directory_entries() {
        let env = envelope();
        let directory: BTreeMap<RecipientId, PublicKey> =
            [(id("alice"), alice().public_key().clone())].into_iter().collect();

        let err = revoke_and_rekey(&env, &id("carol"), &id("alice"), alice().private_key(), &directory)
            .unwrap_err();

        match err {
            EnvelopeError::BuildFailed { recipient, .. } => assert_eq!(recipient, id("bob")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
