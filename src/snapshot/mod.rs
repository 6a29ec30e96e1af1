//! # Snapshot Module
//!
//! Deterministic generation of audit-record datasets. A snapshot is one
//! generation run: a dated, ordered, immutable set of records fully
//! determined by `(snapshot_id, seed)`. Daily snapshots cover a single
//! calendar date; monthly snapshots are the deterministic union of every
//! daily snapshot in the month, re-sorted.
//!
//! The module owns two things:
//!
//! - the typed vocabulary (`types`): [`SnapshotRecord`], [`Snapshot`],
//!   [`SnapshotHash`], and the [`Direction`]/[`SnapshotType`] enums;
//! - the generator (`generator`): id validation, seeded record drawing,
//!   and the final `(timestamp, id)` stable sort that pins output order
//!   regardless of insertion order during generation.
//!
//! Nothing here does I/O. `generated_at` is the only wall-clock field
//! and it is explicitly excluded from hashing and equality semantics.

mod generator;
mod types;

pub use generator::{generate, generate_daily, generate_monthly, SnapshotError};
pub use types::{Direction, Snapshot, SnapshotHash, SnapshotRecord, SnapshotType};
