//! Inclusion proofs: generation and verification.
//!
//! A proof is self-contained — it carries the record, its leaf hash,
//! the sibling path to the root, and the root itself — so it can be
//! verified with no access to the original record list.
//!
//! Verification fails soft by design: a mismatched root is an expected,
//! meaningful outcome (it signals tampering), so it is reported as a
//! structured `valid: false` result. Only a *structurally* broken proof
//! (missing sibling path, non-hex digests) is an error.

use serde::{Deserialize, Serialize};

use crate::merkle::{combine, hash_record, leaf_hashes, next_level, pad_if_odd, MerkleError};
use crate::snapshot::SnapshotRecord;

// ---------------------------------------------------------------------------
// Proof types
// ---------------------------------------------------------------------------

/// Which side of the pair a sibling sat on, relative to the node on the
/// proof's path. The combine rule sorts hashes before concatenation, so
/// this is reconstruction metadata rather than a hashing input — but it
/// is recorded because verifiers and UIs reconstruct tree shape from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingPosition {
    /// The sibling is the lower-indexed node of the pair.
    Left,
    /// The sibling is the higher-indexed node of the pair.
    Right,
}

/// One step of the sibling path, leaf to root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// The sibling's hash at this level.
    pub hash: String,
    /// The sibling's side of the pair.
    pub position: SiblingPosition,
}

/// A self-contained inclusion proof for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// 0-based position of the proven record in the original,
    /// unpadded record list.
    pub index: usize,
    /// Leaf hash of the proven record.
    pub leaf_hash: String,
    /// Copy of the proven record.
    pub record: SnapshotRecord,
    /// Sibling path from leaf to root.
    pub siblings: Vec<ProofStep>,
    /// Root of the tree this proof was generated against.
    pub root_hash: String,
}

/// Outcome of verifying a proof. Mismatches land here, not in an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    /// Whether the recomputed root matched the expected one.
    pub valid: bool,
    /// Human-readable summary for console reporting.
    pub message: String,
    /// Root recomputed by folding the leaf through the sibling path.
    pub computed_root: String,
    /// Root the proof was checked against.
    pub expected_root: String,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate an inclusion proof for `records[index]`.
///
/// Recomputes the same level structure as
/// [`build_tree`](crate::merkle::build_tree) and records the sibling
/// hash and side at each level while walking from leaf to root. When a
/// node is paired with itself (odd level), its own hash is recorded as
/// the sibling.
///
/// # Errors
///
/// [`MerkleError::EmptyInput`] for zero records;
/// [`MerkleError::IndexOutOfRange`] if `index >= records.len()`.
pub fn generate_proof(
    records: &[SnapshotRecord],
    index: usize,
) -> Result<MerkleProof, MerkleError> {
    if records.is_empty() {
        return Err(MerkleError::EmptyInput);
    }
    if index >= records.len() {
        return Err(MerkleError::IndexOutOfRange {
            index,
            count: records.len(),
        });
    }

    let record = records[index].clone();
    let leaf_hash = hash_record(&record)?;

    let mut level = leaf_hashes(records)?;
    pad_if_odd(&mut level);

    let mut siblings = Vec::new();
    let mut current = index;
    while level.len() > 1 {
        let is_left_node = current % 2 == 0;
        let sibling_index = if is_left_node { current + 1 } else { current - 1 };
        // A missing sibling means the node pairs with itself.
        let sibling_hash = level.get(sibling_index).unwrap_or(&level[current]).clone();
        siblings.push(ProofStep {
            hash: sibling_hash,
            position: if is_left_node {
                SiblingPosition::Right
            } else {
                SiblingPosition::Left
            },
        });

        level = next_level(&level);
        current /= 2;
    }

    Ok(MerkleProof {
        index,
        leaf_hash,
        record,
        siblings,
        root_hash: level.swap_remove(0),
    })
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

fn is_hex_digest(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Verify an inclusion proof.
///
/// Folds `leaf_hash` through the sibling path with the same combine
/// rule used during construction, then compares against
/// `expected_root` if supplied, else against the proof's embedded
/// `root_hash`.
///
/// # Errors
///
/// [`MerkleError::MalformedProof`] for structurally invalid proofs: an
/// empty sibling path or digests that are not 64 lowercase hex
/// characters. A *mismatched* proof is not an error — it returns
/// `Ok` with `valid: false`.
pub fn verify_proof(
    proof: &MerkleProof,
    expected_root: Option<&str>,
) -> Result<VerifyResult, MerkleError> {
    if proof.siblings.is_empty() {
        return Err(MerkleError::MalformedProof(
            "sibling path is empty".to_string(),
        ));
    }
    if !is_hex_digest(&proof.leaf_hash) {
        return Err(MerkleError::MalformedProof(format!(
            "leaf hash '{}' is not a 64-char lowercase hex digest",
            proof.leaf_hash
        )));
    }
    if !is_hex_digest(&proof.root_hash) {
        return Err(MerkleError::MalformedProof(format!(
            "root hash '{}' is not a 64-char lowercase hex digest",
            proof.root_hash
        )));
    }
    for (i, step) in proof.siblings.iter().enumerate() {
        if !is_hex_digest(&step.hash) {
            return Err(MerkleError::MalformedProof(format!(
                "sibling {i} hash '{}' is not a 64-char lowercase hex digest",
                step.hash
            )));
        }
    }

    let mut current = proof.leaf_hash.clone();
    for step in &proof.siblings {
        current = match step.position {
            SiblingPosition::Left => combine(&step.hash, &current),
            SiblingPosition::Right => combine(&current, &step.hash),
        };
    }

    let expected = expected_root.unwrap_or(&proof.root_hash).to_string();
    let valid = current == expected;
    let message = if valid {
        "valid proof: record is included in the tree".to_string()
    } else {
        "invalid proof: record does not match the root".to_string()
    };

    Ok(VerifyResult {
        valid,
        message,
        computed_root: current,
        expected_root: expected,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
