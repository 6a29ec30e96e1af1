//! Positional diffing of two record sets.
//!
//! Compares index-by-index up to the longer length, by leaf hash. This
//! is deliberately a structural/positional diff, not a content-addressed
//! multiset diff: an insertion or deletion cascades into "differences"
//! at every subsequent index, and a pure reorder reports as wholesale
//! replacement. That is the tool's observable audit semantics and is
//! preserved as-is — callers who want set-style comparison should diff
//! leaf hash sets themselves.

use serde::{Deserialize, Serialize};

use crate::merkle::{hash_record, MerkleError};
use crate::snapshot::SnapshotRecord;

/// One position where the two sets disagree. Both raw records are
/// attached (when present on that side) so a caller can diff
/// individual fields; a `None` side means the record was added or
/// removed at this index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDifference {
    /// Position where the sets disagree.
    pub index: usize,
    /// Leaf hash on the original side; empty if absent.
    pub original_hash: String,
    /// Leaf hash on the current side; empty if absent.
    pub current_hash: String,
    /// The original record, if that side has one at this index.
    pub original_record: Option<SnapshotRecord>,
    /// The current record, if that side has one at this index.
    pub current_record: Option<SnapshotRecord>,
}

/// Outcome of [`find_differences`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// True when every index matched.
    pub identical: bool,
    /// Indices that disagree, ascending.
    pub different_indices: Vec<usize>,
    /// Full detail for each disagreeing index.
    pub differences: Vec<RecordDifference>,
}

/// Compare two record lists position-by-position.
///
/// # Errors
///
/// [`MerkleError::Canonicalize`] if a record cannot be hashed — not
/// reachable for well-formed records.
pub fn find_differences(
    original: &[SnapshotRecord],
    current: &[SnapshotRecord],
) -> Result<DiffResult, MerkleError> {
    let mut differences = Vec::new();
    let mut different_indices = Vec::new();

    let max_len = original.len().max(current.len());
    for index in 0..max_len {
        let original_record = original.get(index);
        let current_record = current.get(index);

        let original_hash = match original_record {
            Some(record) => hash_record(record)?,
            None => String::new(),
        };
        let current_hash = match current_record {
            Some(record) => hash_record(record)?,
            None => String::new(),
        };

        if original_hash != current_hash {
            different_indices.push(index);
            differences.push(RecordDifference {
                index,
                original_hash,
                current_hash,
                original_record: original_record.cloned(),
                current_record: current_record.cloned(),
            });
        }
    }

    Ok(DiffResult {
        identical: differences.is_empty(),
        different_indices,
        differences,
    })
}
