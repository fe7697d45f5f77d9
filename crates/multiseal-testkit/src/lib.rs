//! # Multiseal Testkit
//!
//! Testing utilities for Multiseal.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a fixed cast of parties with RSA-2048 key pairs,
//!   generated once per test process
//! - **Generators**: Proptest strategies for plaintexts, recipient ids and
//!   sequences of access-list edits
//!
//! RSA key generation dominates test time, so fixtures hand out
//! `&'static` parties instead of generating keys per test.
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use multiseal_testkit::fixtures::{alice, bob, seal_for};
//!
//! let envelope = seal_for("secret-42", &[alice(), bob()]);
//! assert_eq!(envelope.recipient_count(), 2);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use multiseal_testkit::generators::{access_ops, apply_op};
//!
//! proptest! {
//!     #[test]
//!     fn recipients_stay_consistent(ops in access_ops(8)) {
//!         let mut envelope = seal_for("x", &[alice()]);
//!         for op in &ops {
//!             envelope = apply_op(&envelope, op);
//!             prop_assert!(envelope.is_consistent());
//!         }
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{alice, bob, carol, cast, dave, directory, eve, seal_for, Party};
pub use generators::{
    access_op, access_ops, apply_op, expected_access, party_index, plaintext, recipient_id, AccessOp,
    CAST_SIZE,
};
