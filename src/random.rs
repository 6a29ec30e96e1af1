//! # Seeded Random Generation
//!
//! A deterministic PRNG built on Mulberry32 — a fast 32-bit mixer with
//! good statistical properties for non-cryptographic use. Given the same
//! seed it produces the same sequence of draws, forever, on every
//! platform.
//!
//! ## The constants are a contract
//!
//! The multiplier/XOR-shift sequence in [`SeededRandom::next`] and the
//! djb2 constants in [`string_to_seed`] are compatibility constants.
//! Two implementations are interchangeable only if they reproduce
//! bit-identical sequences for the same seed; published commitment
//! hashes depend on it. Do not "improve" them.
//!
//! ## Ownership
//!
//! A generator is inherently sequential: every draw mutates the 32-bit
//! state. That is why every method takes `&mut self` — a single instance
//! has one owner and one call order. Independent instances (distinct
//! seeds) can run in parallel freely; there is no shared state.

/// Alphabet used by [`SeededRandom::next_id`]. Hex-like on purpose:
/// generated ids read like truncated transaction hashes.
const ID_ALPHABET: &[u8] = b"0123456789abcdef";

// ---------------------------------------------------------------------------
// SeededRandom
// ---------------------------------------------------------------------------

/// Deterministic pseudo-random source over a single 32-bit state word.
///
/// # Examples
///
/// ```
/// use auditseal::random::SeededRandom;
///
/// let mut a = SeededRandom::new(42);
/// let mut b = SeededRandom::new(42);
/// assert_eq!(a.next(), b.next());
/// ```
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next draw in `[0, 1)`.
    ///
    /// One Mulberry32 step. The intermediate arithmetic wraps at 32 bits
    /// exactly like the reference sequence; the final division by 2^32
    /// maps the mixed word onto the unit interval. Every other operation
    /// on this type derives from this method.
    pub fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }

    /// Next integer in `[min, max)`.
    ///
    /// Computed as `floor(next() * (max - min)) + min` in IEEE-754 double
    /// arithmetic — the range reduction itself is part of the sequence
    /// contract, so it is not replaced with an integer-only scheme.
    ///
    /// # Panics
    ///
    /// Calling with `max <= min` is a caller contract violation and
    /// panics; there is no silent clamp.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "next_int requires min < max (got {min}..{max})");
        (self.next() * (max - min) as f64).floor() as i64 + min
    }

    /// Next float in `[min, max)`.
    pub fn next_float(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }

    /// Pick one element of `items` uniformly.
    ///
    /// # Panics
    ///
    /// Panics on an empty slice (same contract as [`Self::next_int`]).
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "pick requires a non-empty slice");
        &items[self.next_int(0, items.len() as i64) as usize]
    }

    /// Generate a random identifier: `prefix` followed by `length`
    /// characters drawn from `0123456789abcdef`.
    pub fn next_id(&mut self, prefix: &str, length: usize) -> String {
        let mut id = String::with_capacity(prefix.len() + length);
        id.push_str(prefix);
        for _ in 0..length {
            let idx = self.next_int(0, ID_ALPHABET.len() as i64) as usize;
            id.push(ID_ALPHABET[idx] as char);
        }
        id
    }
}

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Hash a string into a 32-bit seed using the djb2 XOR variant:
/// `h = 5381; h = (h * 33) ^ code_unit`, wrapping at 32 bits.
///
/// Not a cryptographic hash — it only needs to spread snapshot ids and
/// scope tags across the seed space deterministically.
pub fn string_to_seed(s: &str) -> u32 {
    let mut hash: u32 = 5381;
    for c in s.chars() {
        hash = hash.wrapping_mul(33) ^ (c as u32);
    }
    hash
}

/// Combine several values into one seed by joining them with `"|"` and
/// hashing the result with [`string_to_seed`].
///
/// The separator is part of the compatibility contract: it keeps
/// `("ab", "c")` and `("a", "bc")` from colliding.
///
/// # Examples
///
/// ```
/// use auditseal::random::{combine_seed, string_to_seed};
///
/// let seed = combine_seed(&["2025-12-19", "42", "daily"]);
/// assert_eq!(seed, string_to_seed("2025-12-19|42|daily"));
/// ```
pub fn combine_seed<S: AsRef<str>>(parts: &[S]) -> u32 {
    let mut joined = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            joined.push('|');
        }
        joined.push_str(part.as_ref());
    }
    string_to_seed(&joined)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
