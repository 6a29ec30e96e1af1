//! Deterministic snapshot generation.
//!
//! `(snapshot_id, seed)` fully determines the record set. The pipeline
//! is: validate the id against the real calendar, derive a combined seed
//! from `(id, seed, scope)`, draw records from a fresh [`SeededRandom`],
//! then stable-sort by `(timestamp, id)` as the final step so output
//! order never depends on insertion order.
//!
//! The draw order inside a record (hour, minute, second, direction,
//! amount, id, description, account, counterparty) and the contents of
//! the reference lists are compatibility constants: they are consumed by
//! the PRNG sequence and hashed into commitments, so reordering or
//! editing them changes every published hash.

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::debug;

use crate::random::{combine_seed, SeededRandom};
use crate::snapshot::types::{Direction, Snapshot, SnapshotRecord, SnapshotType};

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// Ledger accounts records are booked against. Read-only module data,
/// never mutated after initialization.
const ACCOUNTS: [&str; 10] = [
    "cash",
    "accounts-receivable",
    "accounts-payable",
    "inventory",
    "revenue",
    "expenses",
    "equity",
    "loans-payable",
    "prepaid-expenses",
    "accrued-liabilities",
];

/// Counterparty names.
const COUNTERPARTIES: [&str; 10] = [
    "Acme Corp",
    "Global Trading Co",
    "Tech Solutions Ltd",
    "Prime Suppliers Inc",
    "Metro Services",
    "United Logistics",
    "Alpha Manufacturing",
    "Beta Retail Group",
    "Gamma Consulting",
    "Delta Financial",
];

/// Event descriptions.
const DESCRIPTIONS: [&str; 15] = [
    "Payment received",
    "Invoice issued",
    "Supplier payment",
    "Salary expense",
    "Utility bill",
    "Equipment purchase",
    "Service fee",
    "Interest payment",
    "Tax payment",
    "Refund processed",
    "Deposit received",
    "Commission paid",
    "Rent expense",
    "Insurance premium",
    "Maintenance cost",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the snapshot generator.
///
/// All of these are terminal for the call: generation is pure, so a
/// retry with the same inputs fails identically.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot id is malformed or names an impossible calendar
    /// date. Raised before any generation starts.
    #[error("invalid snapshot id '{id}': {reason}")]
    InvalidSnapshotId {
        /// The offending id, verbatim.
        id: String,
        /// What exactly is wrong with it.
        reason: String,
    },
}

impl SnapshotError {
    fn invalid_id(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSnapshotId {
            id: id.to_owned(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------

/// Validate a daily id (`YYYY-MM-DD`) against the exact grammar and the
/// real calendar (days-in-month, leap years included).
fn parse_daily_id(id: &str) -> Result<NaiveDate, SnapshotError> {
    let b = id.as_bytes();
    let well_formed = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9].iter().all(|&i| b[i].is_ascii_digit());
    if !well_formed {
        return Err(SnapshotError::invalid_id(id, "expected YYYY-MM-DD"));
    }

    let year: i32 = parse_field(id, &id[0..4])?;
    let month: u32 = parse_field(id, &id[5..7])?;
    let day: u32 = parse_field(id, &id[8..10])?;

    if !(1..=12).contains(&month) {
        return Err(SnapshotError::invalid_id(id, format!("month {month} out of range")));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        SnapshotError::invalid_id(id, format!("day {day} out of range for {year}-{month:02}"))
    })
}

/// Validate a monthly id (`YYYY-MM`) and return `(year, month)`.
fn parse_monthly_id(id: &str) -> Result<(i32, u32), SnapshotError> {
    let b = id.as_bytes();
    let well_formed = b.len() == 7
        && b[4] == b'-'
        && [0, 1, 2, 3, 5, 6].iter().all(|&i| b[i].is_ascii_digit());
    if !well_formed {
        return Err(SnapshotError::invalid_id(id, "expected YYYY-MM"));
    }

    let year: i32 = parse_field(id, &id[0..4])?;
    let month: u32 = parse_field(id, &id[5..7])?;
    if !(1..=12).contains(&month) {
        return Err(SnapshotError::invalid_id(id, format!("month {month} out of range")));
    }
    Ok((year, month))
}

fn parse_field<T: std::str::FromStr>(id: &str, field: &str) -> Result<T, SnapshotError> {
    field
        .parse()
        .map_err(|_| SnapshotError::invalid_id(id, format!("unparseable component '{field}'")))
}

// ---------------------------------------------------------------------------
// Record generation
// ---------------------------------------------------------------------------

/// Draw one record. The draw order here is a sequence contract — every
/// call consumes PRNG state in exactly this order.
fn generate_record(rng: &mut SeededRandom, date: &str) -> SnapshotRecord {
    // Business hours, anchored to the snapshot's calendar date at UTC.
    let hour = rng.next_int(8, 18);
    let minute = rng.next_int(0, 60);
    let second = rng.next_int(0, 60);
    let timestamp = format!("{date}T{hour:02}:{minute:02}:{second:02}.000Z");

    let direction = if rng.next() > 0.5 {
        Direction::Credit
    } else {
        Direction::Debit
    };

    // Round half-away-from-zero to 2 decimals.
    let amount = (rng.next_float(10.0, 10_000.0) * 100.0).round() / 100.0;

    let id = rng.next_id("txn-", 8);
    let description = rng.pick(&DESCRIPTIONS).to_string();
    let account = rng.pick(&ACCOUNTS).to_string();
    let counterparty = rng.pick(&COUNTERPARTIES).to_string();

    SnapshotRecord {
        id,
        timestamp,
        description,
        amount,
        direction,
        account,
        counterparty,
    }
}

/// Stable sort by `(timestamp, id)` ascending. Lexicographic comparison
/// of the ISO-8601 strings equals chronological order.
fn sort_records(records: &mut [SnapshotRecord]) {
    records.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate a daily snapshot: 10–50 records for a single calendar date.
///
/// The id is validated before any generation work. Identical
/// `(snapshot_id, seed)` inputs always yield byte-identical `records`;
/// only `generated_at` varies between runs.
///
/// # Errors
///
/// [`SnapshotError::InvalidSnapshotId`] if the id is not a real
/// `YYYY-MM-DD` date.
pub fn generate_daily(snapshot_id: &str, seed: i64) -> Result<Snapshot, SnapshotError> {
    parse_daily_id(snapshot_id)?;

    let seed_str = seed.to_string();
    let combined = combine_seed(&[snapshot_id, seed_str.as_str(), "daily"]);
    let mut rng = SeededRandom::new(combined);

    let record_count = rng.next_int(10, 51) as usize;
    let mut records = Vec::with_capacity(record_count);
    for _ in 0..record_count {
        records.push(generate_record(&mut rng, snapshot_id));
    }
    sort_records(&mut records);

    debug!(snapshot_id, seed, record_count, "generated daily snapshot");

    Ok(Snapshot {
        snapshot_id: snapshot_id.to_owned(),
        snapshot_type: SnapshotType::Daily,
        seed,
        generated_at: now_iso(),
        records,
    })
}

/// Generate a monthly snapshot: the union of every daily snapshot in
/// the month, generated with the same seed, then re-sorted.
///
/// There is no separate monthly record-count draw — the total is the sum
/// of each day's independently drawn count.
///
/// # Errors
///
/// [`SnapshotError::InvalidSnapshotId`] if the id is not a valid
/// `YYYY-MM` month.
pub fn generate_monthly(snapshot_id: &str, seed: i64) -> Result<Snapshot, SnapshotError> {
    let (year, month) = parse_monthly_id(snapshot_id)?;

    let mut records = Vec::new();
    for day in 1..=31u32 {
        if NaiveDate::from_ymd_opt(year, month, day).is_none() {
            break;
        }
        let day_id = format!("{year:04}-{month:02}-{day:02}");
        let daily = generate_daily(&day_id, seed)?;
        records.extend(daily.records);
    }
    sort_records(&mut records);

    debug!(
        snapshot_id,
        seed,
        record_count = records.len(),
        "generated monthly snapshot"
    );

    Ok(Snapshot {
        snapshot_id: snapshot_id.to_owned(),
        snapshot_type: SnapshotType::Monthly,
        seed,
        generated_at: now_iso(),
        records,
    })
}

/// Dispatch on [`SnapshotType`].
///
/// # Errors
///
/// Propagates [`SnapshotError::InvalidSnapshotId`] from the underlying
/// generator.
pub fn generate(
    snapshot_id: &str,
    snapshot_type: SnapshotType,
    seed: i64,
) -> Result<Snapshot, SnapshotError> {
    match snapshot_type {
        SnapshotType::Daily => generate_daily(snapshot_id, seed),
        SnapshotType::Monthly => generate_monthly(snapshot_id, seed),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
