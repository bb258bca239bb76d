//! Single-token similarity via the length of the longest common
//! subsequence.
//!
//! For query tokens that fit one machine word the LLCS comes out of the
//! bit-parallel recurrence `S = (S + U) | (S - U)` (Hyyrö 2004): each bit
//! of `S` tracks one column of the LCS table and a whole row advances in
//! a handful of word operations. Longer tokens fall back to a row
//! representation made of `[start, end)` blocks marking the positions
//! where the DP row increments, walked once per field character.
//!
//! The raw LLCS is folded into a similarity score as
//! `sz * llcs^2 + bonus_match_start * prefix` with `sz = (m+n)/(2mn)`,
//! so longer coherent matches dominate collections of short near-misses.

use std::collections::HashMap;

use crate::options::SearchOptions;
use crate::score::alphabet::{AlphabetMap, POSITION_SENTINEL};
use crate::score::{common_prefix_len, rel_size_ok, similarity, BitMask, ScoreType};

/// Score one query token against one field token.
///
/// `map` must be the alphabet map of `query` (any variant). Total over
/// all inputs: pairs outside the relative-size window, and characters
/// unknown to the map, simply score zero.
pub fn score_single(query: &str, field: &str, map: &AlphabetMap, opts: &SearchOptions) -> ScoreType {
    let m = query.chars().count();
    let n = field.chars().count();
    if m == 0 || n == 0 {
        return 0.0;
    }
    if !rel_size_ok(m, n, opts.token_min_rel_size, opts.token_max_rel_size) {
        return 0.0;
    }

    let prefix = common_prefix_len(query, field);
    if prefix == m.min(n) {
        // One side fully consumed by the common prefix.
        return similarity(prefix, m, n, prefix, opts.bonus_match_start);
    }

    let llcs = match map {
        AlphabetMap::Bits(bits) => llcs_short(m, field, bits, prefix),
        AlphabetMap::Positions(positions) => llcs_large(field, positions, prefix),
    };
    similarity(llcs, m, n, prefix, opts.bonus_match_start)
}

/// One-shot convenience: build the query's map and score the pair.
pub fn score(query: &str, field: &str, opts: &SearchOptions) -> ScoreType {
    score_single(query, field, &AlphabetMap::build(query), opts)
}

/// Bit-parallel LLCS for a query of `m` chars, `m <= MASK_BITS`.
///
/// The first `prefix` characters of both strings are known equal; their
/// columns are skipped in the sweep and masked out before the popcount.
fn llcs_short(m: usize, field: &str, map: &HashMap<char, BitMask>, prefix: usize) -> usize {
    let mut mask: BitMask = (1 << m) - 1;
    let mut s = mask;
    for c in field.chars().skip(prefix) {
        if let Some(&cm) = map.get(&c) {
            let u = s & cm;
            // Carries past the word end are immaterial; only the low
            // `m` bits are ever read. `u` is a subset of `s`, so the
            // subtraction cannot borrow.
            s = s.wrapping_add(u) | (s - u);
        }
    }
    mask &= !((1 << prefix) - 1);
    prefix + ((!s) & mask).count_ones() as usize
}

/// LLCS for queries wider than the bit-parallel word.
///
/// Each DP row is a list of `[start, end)` blocks covering the positions
/// where the row value increments. Per field character, the previous
/// row's blocks are walked left to right while a pointer advances through
/// the character's match-position list; the first match before a block is
/// dominant: it registers one position (extending the previous run when
/// adjacent) and the block sheds its first position. A match landing past
/// every block appends a new run, raising the LLCS by one. The sentinel
/// terminating every position list keeps the walk branch-light.
fn llcs_large(field: &str, map: &HashMap<char, Vec<u32>>, prefix: usize) -> usize {
    let mut last_row: Vec<(u32, u32)> = Vec::new();
    let mut row: Vec<(u32, u32)> = Vec::new();

    for c in field.chars().skip(prefix) {
        let positions = match map.get(&c) {
            Some(p) => p,
            None => continue,
        };
        row.clear();
        let mut pi = positions.partition_point(|&p| (p as usize) < prefix);
        let mut prev_end = prefix as u32;
        let mut changed = false;

        for &(start, end) in last_row
            .iter()
            .chain(std::iter::once(&(POSITION_SENTINEL, POSITION_SENTINEL)))
        {
            while positions[pi] < prev_end {
                pi += 1;
            }
            let pos = positions[pi];
            if pos < start {
                register(&mut row, pos);
                pi += 1;
                changed = true;
                if start != POSITION_SENTINEL && start + 1 < end {
                    row.push((start + 1, end));
                }
            } else if start != POSITION_SENTINEL {
                row.push((start, end));
            }
            if start != POSITION_SENTINEL {
                prev_end = end;
            }
        }

        if changed {
            std::mem::swap(&mut last_row, &mut row);
        }
    }

    prefix + last_row.iter().map(|&(s, e)| (e - s) as usize).sum::<usize>()
}

/// Append `pos` to the current row, merging with the last run when
/// adjacent.
#[inline]
fn register(row: &mut Vec<(u32, u32)>, pos: u32) {
    match row.last_mut() {
        Some(last) if last.1 == pos => last.1 = pos + 1,
        _ => row.push((pos, pos + 1)),
    }
}
