//! Core type definitions for audit snapshots.
//!
//! These structs are the fixed field set the canonicalizer sorts over —
//! every field is named, typed, and serialized under exactly one key, so
//! the canonical JSON of a record is exhaustive and stable by
//! construction. Records are immutable once generated; there are no
//! mutating methods on purpose.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Whether a record moves value out of (`Debit`) or into (`Credit`) the
/// account it is booked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Value leaves the account.
    Debit,
    /// Value enters the account.
    Credit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

// ---------------------------------------------------------------------------
// SnapshotType
// ---------------------------------------------------------------------------

/// Granularity of a snapshot: one calendar day or one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotType {
    /// Single date, id shaped `YYYY-MM-DD`.
    Daily,
    /// Whole month, id shaped `YYYY-MM`; the union of its daily runs.
    Monthly,
}

impl fmt::Display for SnapshotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

// ---------------------------------------------------------------------------
// SnapshotRecord
// ---------------------------------------------------------------------------

/// One audit-worthy event.
///
/// The `timestamp` is an ISO-8601 UTC string with millisecond precision
/// (`YYYY-MM-DDTHH:MM:SS.000Z`). It is kept as a string deliberately:
/// lexicographic comparison of this shape equals chronological order,
/// and the exact textual form is part of the commitment (it gets
/// hashed verbatim).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Record identifier, `txn-` plus eight hex characters.
    pub id: String,
    /// ISO-8601 UTC timestamp, millisecond precision.
    pub timestamp: String,
    /// Human-readable event description, from a fixed reference list.
    pub description: String,
    /// Monetary amount, rounded to 2 decimals.
    pub amount: f64,
    /// Debit or credit.
    pub direction: Direction,
    /// Ledger account, from a fixed reference list.
    pub account: String,
    /// Counterparty name, from a fixed reference list.
    pub counterparty: String,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One generation run: identifier, inputs, and the sorted record set.
///
/// `generated_at` is informational wall-clock metadata. It is excluded
/// from [`crate::commitment::hash_snapshot`] and must never participate
/// in any equality or determinism check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// `YYYY-MM-DD` for daily, `YYYY-MM` for monthly.
    pub snapshot_id: String,
    /// Daily or monthly.
    pub snapshot_type: SnapshotType,
    /// The caller-supplied seed this run was derived from.
    pub seed: i64,
    /// Wall-clock generation time. Informational only; never hashed.
    pub generated_at: String,
    /// Records sorted ascending by `(timestamp, id)`.
    pub records: Vec<SnapshotRecord>,
}

impl Snapshot {
    /// Number of records in this snapshot.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// SnapshotHash
// ---------------------------------------------------------------------------

/// Derived commitment summary for a snapshot.
///
/// Computed on demand by [`crate::commitment::hash_snapshot`]; the
/// [`Snapshot`] itself remains the source of truth. The on-chain adapter
/// consumes `commitment_hash` as an opaque value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHash {
    /// Identifier of the snapshot this hash commits to.
    pub snapshot_id: String,
    /// Daily or monthly.
    pub snapshot_type: SnapshotType,
    /// SHA-256 of the canonical JSON projection, 64 lowercase hex chars.
    pub commitment_hash: String,
    /// Number of records covered by the commitment.
    pub record_count: usize,
    /// Byte length of the canonical JSON that was hashed.
    pub canonical_json_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Debit).unwrap(), "\"debit\"");
        assert_eq!(serde_json::to_string(&Direction::Credit).unwrap(), "\"credit\"");
    }

    #[test]
    fn snapshot_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SnapshotType::Daily).unwrap(), "\"daily\"");
        assert_eq!(serde_json::to_string(&SnapshotType::Monthly).unwrap(), "\"monthly\"");
    }

    #[test]
    fn record_serialization_roundtrip() {
        let record = SnapshotRecord {
            id: "txn-6fa2f710".into(),
            timestamp: "2025-12-19T08:01:09.000Z".into(),
            description: "Supplier payment".into(),
            amount: 3525.72,
            direction: Direction::Credit,
            account: "equity".into(),
            counterparty: "Alpha Manufacturing".into(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: SnapshotRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(Direction::Credit.to_string(), "credit");
        assert_eq!(SnapshotType::Monthly.to_string(), "monthly");
    }
}
