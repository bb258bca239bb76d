//! The scoring kernel: bit-parallel LLCS, packed multi-token sweeps,
//! token assignment and local alignment.
//!
//! Scores flow bottom-up: [`alphabet`] builds per-token character maps,
//! [`pack`] groups short query tokens into bit lanes of one machine word,
//! [`llcs`] scores one query token against one field token, [`packed`]
//! scores a whole group in a single sweep, [`assign`] pairs query tokens
//! with field tokens one-to-one, and [`align`] turns a chosen pair into
//! highlight ranges.

pub mod align;
pub mod alphabet;
pub mod assign;
pub mod llcs;
pub mod pack;
pub mod packed;
pub mod util;

/// Score values produced by the kernel.
pub type ScoreType = f64;

/// Bit vector driving the bit-parallel scorers.
pub type BitMask = u64;

/// Usable width of [`BitMask`]. The top bit stays free so the
/// `(S + U) | (S - U)` recurrence has room for its carry.
pub const MASK_BITS: usize = 63;

/// Length of the common prefix of `a` and `b`, in chars.
#[inline]
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Combine an LLCS count with the size normalisation and prefix bonus.
///
/// `sz = (m + n) / (2 * m * n)` scales the squared LLCS so that a long
/// well-matched token outranks many short near-misses.
#[inline]
pub(crate) fn similarity(llcs: usize, m: usize, n: usize, prefix: usize, bonus_match_start: ScoreType) -> ScoreType {
    let sz = (m + n) as ScoreType / (2.0 * m as ScoreType * n as ScoreType);
    sz * (llcs * llcs) as ScoreType + bonus_match_start * prefix as ScoreType
}

/// Relative-size gate: reject field tokens much shorter or much longer
/// than the query token.
#[inline]
pub(crate) fn rel_size_ok(m: usize, n: usize, min_rel: ScoreType, max_rel: ScoreType) -> bool {
    let m = m as ScoreType;
    let n = n as ScoreType;
    n >= min_rel * m && n <= max_rel * m
}
