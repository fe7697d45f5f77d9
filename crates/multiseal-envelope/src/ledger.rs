//! In-memory record of recovery attempts.
//!
//! The ledger belongs to whoever drives the reader (a session, a UI), not
//! to the envelope. It is append-only and has no internal locking.

use multiseal_core::RecipientId;
use serde::{Deserialize, Serialize};

use crate::envelope::now_millis;
use crate::error::ErrorKind;
use crate::reader::DecryptionResult;

/// One recorded attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Name shown to users.
    pub recipient_display_name: String,

    /// Identity the attempt was made as.
    pub recipient_id: RecipientId,

    pub success: bool,

    /// Why the attempt failed, if it did.
    pub error: Option<ErrorKind>,

    /// When it was recorded (Unix milliseconds).
    pub timestamp: i64,
}

/// Append-only attempt log. Insertion order is chronological order.
#[derive(Debug, Clone, Default)]
pub struct AttemptLedger {
    records: Vec<AttemptRecord>,
}

impl AttemptLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt stamped with the current time.
    pub fn record(&mut self, outcome: &DecryptionResult, display_name: impl Into<String>) {
        self.record_at(outcome, display_name, now_millis());
    }

    /// Record an attempt with an explicit timestamp.
    pub fn record_at(
        &mut self,
        outcome: &DecryptionResult,
        display_name: impl Into<String>,
        timestamp: i64,
    ) {
        self.records.push(AttemptRecord {
            recipient_display_name: display_name.into(),
            recipient_id: outcome.recipient_id.clone(),
            success: outcome.success,
            error: outcome.error,
            timestamp,
        });
    }

    /// All records, oldest first.
    pub fn all(&self) -> &[AttemptRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttemptRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&AttemptRecord> {
        self.records.last()
    }

    /// Number of successful attempts.
    pub fn successes(&self) -> usize {
        self.records.iter().filter(|r| r.success).count()
    }

    /// Number of failed attempts.
    pub fn failures(&self) -> usize {
        self.records.len() - self.successes()
    }
}
