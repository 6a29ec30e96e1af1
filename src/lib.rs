// Copyright (c) 2026 Auditseal Contributors. MIT License.
// See LICENSE for details.

//! # Auditseal — Verifiable Audit-Snapshot Core
//!
//! Auditseal turns a dated set of audit records into a single commitment
//! hash that can be published on-chain and later used to prove — or
//! disprove — the integrity of any individual record, without ever
//! re-publishing the dataset itself.
//!
//! Everything in this crate is deterministic. Same inputs, same bytes,
//! same hashes, on every machine, in every language runtime that follows
//! the same canonical rules. That property is not decorative: a published
//! commitment is only worth something if a verifier five years from now
//! can regenerate it bit-for-bit.
//!
//! ## Architecture
//!
//! Four modules, leaves first:
//!
//! - **random** — Seeded Mulberry32 PRNG. Reproducible sequences from a
//!   32-bit seed. The mixing constants are a wire-format contract.
//! - **snapshot** — Deterministic generation of daily and monthly audit
//!   record sets, with strict calendar validation and a stable
//!   `(timestamp, id)` sort.
//! - **commitment** — Canonical JSON serialization (sorted keys, compact,
//!   stable number formatting) and SHA-256 commitment hashing.
//! - **merkle** — Binary hash tree over per-record leaves: root
//!   computation, inclusion proofs, proof verification, and positional
//!   diffing of two record sets.
//!
//! ## What this crate is not
//!
//! No network I/O, no key management, no publish scheduling. The CLI and
//! the on-chain adapter consume this library; they do not live in it.
//! They treat every hash produced here as an opaque value.
//!
//! ## Design Philosophy
//!
//! 1. Determinism over convenience. Every ambiguity is resolved by rule.
//! 2. Compatibility constants stay frozen — changing a mixing constant or
//!    a reference list silently invalidates every published commitment.
//! 3. Proof verification fails soft: a mismatch is a meaningful result,
//!    not a programming error.

pub mod commitment;
pub mod merkle;
pub mod random;
pub mod snapshot;
