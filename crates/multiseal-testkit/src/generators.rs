//! Proptest generators for property-based testing.

use proptest::prelude::*;

use multiseal_core::RecipientId;
use multiseal_envelope::{grant_access, revoke_access, Envelope};

use crate::fixtures::cast;

/// Number of parties in the fixture cast.
pub const CAST_SIZE: usize = 5;

/// Generate a UTF-8 plaintext, including the empty string.
pub fn plaintext() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        ".{1,64}".prop_map(String::from),
        "[\\PC]{64,512}".prop_map(String::from),
    ]
}

/// Generate a recipient identifier.
pub fn recipient_id() -> impl Strategy<Value = RecipientId> {
    "[a-z][a-z0-9_-]{0,15}".prop_map(RecipientId::from)
}

/// Generate an index into the fixture cast.
pub fn party_index() -> impl Strategy<Value = usize> {
    0..CAST_SIZE
}

/// One edit to an envelope's recipient set, by cast index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOp {
    /// Grant `party` access through `via`.
    Grant { party: usize, via: usize },
    /// Revoke `party`.
    Revoke { party: usize },
}

/// Generate a single access edit.
pub fn access_op() -> impl Strategy<Value = AccessOp> {
    prop_oneof![
        (party_index(), party_index()).prop_map(|(party, via)| AccessOp::Grant { party, via }),
        party_index().prop_map(|party| AccessOp::Revoke { party }),
    ]
}

/// Generate up to `max_len` access edits.
pub fn access_ops(max_len: usize) -> impl Strategy<Value = Vec<AccessOp>> {
    prop::collection::vec(access_op(), 0..=max_len)
}

/// Apply `op` to `envelope` using the fixture cast.
///
/// A grant through a party that cannot open the envelope fails; the input
/// envelope is returned unchanged in that case.
pub fn apply_op(envelope: &Envelope, op: &AccessOp) -> Envelope {
    let parties = cast();
    match *op {
        AccessOp::Grant { party, via } => {
            let (target, via) = (parties[party], parties[via]);
            grant_access(
                envelope,
                &target.id,
                target.public_key(),
                &via.id,
                via.private_key(),
            )
            .unwrap_or_else(|_| envelope.clone())
        }
        AccessOp::Revoke { party } => revoke_access(envelope, &parties[party].id),
    }
}

/// The set of cast indices expected to hold access after `ops`, starting
/// from `initial`.
pub fn expected_access(initial: &[usize], ops: &[AccessOp]) -> Vec<bool> {
    let mut access = vec![false; CAST_SIZE];
    for &i in initial {
        access[i] = true;
    }
    for op in ops {
        match *op {
            AccessOp::Grant { party, via } => {
                if access[via] {
                    access[party] = true;
                }
            }
            AccessOp::Revoke { party } => access[party] = false,
        }
    }
    access
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{alice, seal_for};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn test_recipient_ids_are_nonempty(id in recipient_id()) {
            prop_assert!(!id.as_str().is_empty());
        }

        #[test]
        fn test_ops_stay_in_cast(ops in access_ops(16)) {
            for op in ops {
                match op {
                    AccessOp::Grant { party, via } => {
                        prop_assert!(party < CAST_SIZE && via < CAST_SIZE)
                    }
                    AccessOp::Revoke { party } => prop_assert!(party < CAST_SIZE),
                }
            }
        }
    }

    #[test]
    fn test_expected_access_tracks_grants_and_revokes() {
        let ops = vec![
            AccessOp::Grant { party: 2, via: 0 },
            AccessOp::Revoke { party: 0 },
            AccessOp::Grant { party: 3, via: 0 },
            AccessOp::Grant { party: 4, via: 2 },
        ];
        let access = expected_access(&[0], &ops);
        assert_eq!(access, vec![false, false, true, false, true]);
    }

    #[test]
    fn test_apply_failed_grant_is_noop() {
        let envelope = seal_for("x", &[alice()]);
        let next = apply_op(&envelope, &AccessOp::Grant { party: 2, via: 1 });
        assert_eq!(next, envelope);
    }
}
