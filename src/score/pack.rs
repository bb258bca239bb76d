//! Greedy packing of short query tokens into bit lanes of one word.
//!
//! Several short tokens share a single [`BitMask`]: each occupies a
//! contiguous lane of bits, and a combined alphabet map carries all of
//! them at once. The `gate` mask has a zero at the top bit of every lane,
//! which stops addition carries in the packed recurrence from leaking
//! into the next lane.

use crate::score::alphabet::{extend_bit_map, position_map, AlphabetMap};
use crate::score::{BitMask, MASK_BITS};

/// A group of query tokens scored together.
///
/// Either several short tokens packed into disjoint lanes (map variant
/// `Bits`), or a single long token carrying its position lists (variant
/// `Positions`, always alone in its group).
#[derive(Debug, Clone)]
pub struct TokenGroup {
    /// The tokens of this group, in query order.
    pub tokens: Vec<String>,
    /// Bit offset of each token's lane.
    pub offsets: Vec<usize>,
    /// Char count of each token.
    pub lengths: Vec<usize>,
    /// Combined alphabet map spanning all lanes.
    pub map: AlphabetMap,
    /// All bits of every lane except each lane's top bit.
    pub gate: BitMask,
}

impl TokenGroup {
    /// Number of lanes (tokens) in this group.
    pub fn lanes(&self) -> usize {
        self.tokens.len()
    }

    fn solo_long(token: &str, len: usize) -> Self {
        TokenGroup {
            tokens: vec![token.to_owned()],
            offsets: vec![0],
            lengths: vec![len],
            map: AlphabetMap::Positions(position_map(token)),
            gate: 0,
        }
    }
}

#[derive(Default)]
struct GroupAccumulator {
    tokens: Vec<String>,
    offsets: Vec<usize>,
    lengths: Vec<usize>,
    map: std::collections::HashMap<char, BitMask>,
    gate: BitMask,
    offset: usize,
}

impl GroupAccumulator {
    fn push(&mut self, token: &str, len: usize) {
        extend_bit_map(&mut self.map, token, self.offset);
        self.gate |= ((1 << (len - 1)) - 1) << self.offset;
        self.tokens.push(token.to_owned());
        self.offsets.push(self.offset);
        self.lengths.push(len);
        self.offset += len;
    }

    fn flush(&mut self, groups: &mut Vec<TokenGroup>) {
        if self.tokens.is_empty() {
            return;
        }
        let acc = std::mem::take(self);
        groups.push(TokenGroup {
            tokens: acc.tokens,
            offsets: acc.offsets,
            lengths: acc.lengths,
            map: AlphabetMap::Bits(acc.map),
            gate: acc.gate,
        });
    }
}

/// Pack `tokens` into groups, first-fit in input order.
///
/// A token of length `>= MASK_BITS` closes the current group and becomes
/// a solo group with the position-list alphabet; otherwise it joins the
/// current group if its lane still fits, or opens a fresh one.
pub fn pack_tokens(tokens: &[String]) -> Vec<TokenGroup> {
    let mut groups = Vec::new();
    let mut acc = GroupAccumulator::default();

    for token in tokens {
        let len = token.chars().count();
        if len == 0 {
            continue;
        }
        if len >= MASK_BITS {
            acc.flush(&mut groups);
            groups.push(TokenGroup::solo_long(token, len));
            continue;
        }
        if acc.offset + len > MASK_BITS {
            acc.flush(&mut groups);
        }
        acc.push(token, len);
    }
    acc.flush(&mut groups);
    groups
}
