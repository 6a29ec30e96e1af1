//! # Merkle Module
//!
//! A binary hash tree over per-record leaves. Publishing only the root
//! on-chain is enough to later prove that any single record belongs to
//! the committed set — and to pinpoint which record was altered when
//! one doesn't.
//!
//! ## Construction rules (compatibility constants)
//!
//! - A leaf is `SHA-256(canonical JSON of the record)`; each record is
//!   canonicalized independently.
//! - An odd leaf count duplicates the last leaf; an odd node count at
//!   any upper level pairs the last node with itself. This matches the
//!   previously published roots and must be preserved exactly. It is a
//!   compatibility constraint, not a recommendation — new designs
//!   should prefer an explicit empty-sentinel scheme, since
//!   duplicate-padding skews proof sizes on lopsided trees.
//! - Parents are `SHA-256(min(a, b) || max(a, b))` by lexicographic
//!   comparison of the hex strings, so the parent is independent of
//!   which side was "left" at the raw hash level. Proofs still carry
//!   positional metadata for reconstruction.
//!
//! Trees are built fresh from a record slice and never updated
//! incrementally; any record change is a full rebuild.

mod diff;
mod proof;

pub use diff::{find_differences, DiffResult, RecordDifference};
pub use proof::{
    generate_proof, verify_proof, MerkleProof, ProofStep, SiblingPosition, VerifyResult,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::commitment::{canonicalize, compute_hash, CanonicalizeError};
use crate::snapshot::SnapshotRecord;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from Merkle tree operations.
#[derive(Debug, Error)]
pub enum MerkleError {
    /// A tree over zero records is undefined — not an empty root.
    #[error("cannot build a Merkle tree from zero records")]
    EmptyInput,

    /// A proof was requested for a record index that does not exist.
    #[error("record index {index} out of range for {count} records")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of records actually present.
        count: usize,
    },

    /// A structurally invalid proof was supplied to verification.
    /// Distinct from a *mismatched* proof, which is a valid negative
    /// verification result, not an error.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// A record could not be canonicalized for hashing.
    #[error(transparent)]
    Canonicalize(#[from] CanonicalizeError),
}

// ---------------------------------------------------------------------------
// MerkleTree
// ---------------------------------------------------------------------------

/// The result of building a tree: root, per-record leaf hashes
/// (unpadded — exactly one per record), and the record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    /// Root hash; the value published on-chain.
    pub root: String,
    /// Leaf hashes in record order, one per record (padding leaves are
    /// an internal construction detail and are not reported).
    pub leaves: Vec<String>,
    /// Number of records the tree commits to.
    pub record_count: usize,
}

// ---------------------------------------------------------------------------
// Hashing primitives
// ---------------------------------------------------------------------------

/// Hash a single record into its leaf: SHA-256 of its canonical JSON.
///
/// # Errors
///
/// [`CanonicalizeError`] if the record cannot be serialized — not
/// reachable for well-formed records.
pub fn hash_record(record: &SnapshotRecord) -> Result<String, CanonicalizeError> {
    Ok(compute_hash(canonicalize(record)?))
}

/// Combine two node hashes into their parent: `SHA-256(min || max)`.
pub(crate) fn combine(a: &str, b: &str) -> String {
    let mut preimage = String::with_capacity(a.len() + b.len());
    if a <= b {
        preimage.push_str(a);
        preimage.push_str(b);
    } else {
        preimage.push_str(b);
        preimage.push_str(a);
    }
    compute_hash(preimage)
}

/// Leaf hashes for a record slice, in record order.
pub(crate) fn leaf_hashes(records: &[SnapshotRecord]) -> Result<Vec<String>, CanonicalizeError> {
    records.iter().map(hash_record).collect()
}

/// Duplicate the last node if the level has an odd length.
pub(crate) fn pad_if_odd(level: &mut Vec<String>) {
    if level.len() % 2 != 0 {
        let last = level[level.len() - 1].clone();
        level.push(last);
    }
}

/// Compute the next level up: pair adjacent nodes left-to-right,
/// pairing a trailing unpaired node with itself.
pub(crate) fn next_level(level: &[String]) -> Vec<String> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    for pair in level.chunks(2) {
        let left = &pair[0];
        let right = pair.get(1).unwrap_or(left);
        next.push(combine(left, right));
    }
    next
}

// ---------------------------------------------------------------------------
// Tree construction
// ---------------------------------------------------------------------------

/// Build a Merkle tree over a non-empty, ordered record slice.
///
/// # Errors
///
/// [`MerkleError::EmptyInput`] for zero records.
///
/// # Examples
///
/// ```
/// use auditseal::merkle::build_tree;
/// use auditseal::snapshot::generate_daily;
///
/// let snapshot = generate_daily("2025-12-19", 42).unwrap();
/// let tree = build_tree(&snapshot.records).unwrap();
/// assert_eq!(tree.leaves.len(), snapshot.records.len());
/// assert_eq!(tree.root.len(), 64);
/// ```
pub fn build_tree(records: &[SnapshotRecord]) -> Result<MerkleTree, MerkleError> {
    if records.is_empty() {
        return Err(MerkleError::EmptyInput);
    }

    let leaves = leaf_hashes(records)?;

    let mut level = leaves.clone();
    pad_if_odd(&mut level);
    while level.len() > 1 {
        level = next_level(&level);
    }
    let root = level.swap_remove(0);

    debug!(record_count = records.len(), root = %root, "built Merkle tree");

    Ok(MerkleTree {
        root,
        leaves,
        record_count: records.len(),
    })
}

// ---------------------------------------------------------------------------
// Visualization
// ---------------------------------------------------------------------------

/// Render a human-readable summary of a tree for console reporting.
pub fn visualize_tree(tree: &MerkleTree) -> String {
    let mut lines = Vec::with_capacity(tree.leaves.len() + 6);
    lines.push("Merkle Tree".to_string());
    lines.push("═".repeat(70));
    lines.push(format!("Root: {}", tree.root));
    lines.push(format!("Records: {}", tree.record_count));
    lines.push("─".repeat(70));
    lines.push("Leaves (record hashes):".to_string());
    for (i, hash) in tree.leaves.iter().enumerate() {
        lines.push(format!("  [{i}] {}...", &hash[..16]));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
