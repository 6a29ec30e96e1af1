//! # Commitment Module
//!
//! Canonical serialization and SHA-256 hashing — the step that turns a
//! snapshot into the single opaque value the on-chain adapter publishes.
//!
//! SHA-256 (not a faster modern hash) because the commitment must be
//! recomputable by every mainstream runtime and verifiable against
//! standard test vectors; interoperability beats speed here, and the
//! inputs are small.
//!
//! Two derivations live here:
//!
//! - [`hash_snapshot`] — the commitment over a snapshot's deterministic
//!   fields (`generated_at` is explicitly excluded);
//! - [`derive_asset_name`] — SHA-256 of the raw snapshot id, used by the
//!   external adapter as an on-chain token name. It depends only on the
//!   identifier, never on the snapshot's contents.

mod canonical;

pub use canonical::{canonicalize, CanonicalizeError};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::snapshot::{Snapshot, SnapshotHash, SnapshotRecord, SnapshotType};

// ---------------------------------------------------------------------------
// SHA-256
// ---------------------------------------------------------------------------

/// SHA-256 of `data`, as 64 lowercase hex characters.
///
/// # Examples
///
/// ```
/// use auditseal::commitment::compute_hash;
///
/// assert_eq!(
///     compute_hash("hello"),
///     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
/// );
/// ```
pub fn compute_hash(data: impl AsRef<[u8]>) -> String {
    hex::encode(compute_hash_bytes(data))
}

/// SHA-256 of `data`, as the raw 32-byte digest.
///
/// The byte form exists for the on-chain adapter, which embeds digests
/// into transaction metadata without a hex round-trip.
pub fn compute_hash_bytes(data: impl AsRef<[u8]>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data.as_ref());
    hasher.finalize().into()
}

// ---------------------------------------------------------------------------
// Snapshot commitment
// ---------------------------------------------------------------------------

/// The hashable projection of a snapshot: only the fields that are
/// deterministic functions of `(snapshot_id, seed)`. `generated_at` is
/// wall-clock metadata and must never leak into the commitment.
#[derive(Serialize)]
struct HashableSnapshot<'a> {
    snapshot_id: &'a str,
    snapshot_type: SnapshotType,
    seed: i64,
    records: &'a [SnapshotRecord],
}

/// Compute the commitment hash for a snapshot.
///
/// Canonicalizes the deterministic projection and hashes the canonical
/// string. The returned [`SnapshotHash`] also reports the record count
/// and the canonical JSON's byte length, which the CLI surfaces for
/// audit logs.
///
/// # Errors
///
/// [`CanonicalizeError`] if the projection cannot be serialized — not
/// reachable for well-formed snapshots.
pub fn hash_snapshot(snapshot: &Snapshot) -> Result<SnapshotHash, CanonicalizeError> {
    let projection = HashableSnapshot {
        snapshot_id: &snapshot.snapshot_id,
        snapshot_type: snapshot.snapshot_type,
        seed: snapshot.seed,
        records: &snapshot.records,
    };
    let canonical_json = canonicalize(&projection)?;
    let commitment_hash = compute_hash(&canonical_json);

    debug!(
        snapshot_id = %snapshot.snapshot_id,
        commitment_hash = %commitment_hash,
        canonical_json_length = canonical_json.len(),
        "hashed snapshot"
    );

    Ok(SnapshotHash {
        snapshot_id: snapshot.snapshot_id.clone(),
        snapshot_type: snapshot.snapshot_type,
        commitment_hash,
        record_count: snapshot.records.len(),
        canonical_json_length: canonical_json.len(),
    })
}

// ---------------------------------------------------------------------------
// Asset name derivation
// ---------------------------------------------------------------------------

/// Derive the on-chain asset name for a snapshot id: SHA-256 of the raw
/// id string, hex-encoded (64 characters = 32 bytes).
pub fn derive_asset_name(snapshot_id: &str) -> String {
    compute_hash(snapshot_id)
}

/// Byte form of [`derive_asset_name`].
pub fn derive_asset_name_bytes(snapshot_id: &str) -> [u8; 32] {
    compute_hash_bytes(snapshot_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
