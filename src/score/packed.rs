//! One-sweep scoring of a packed token group against a field token.
//!
//! All lanes of a [`TokenGroup`] advance together: the recurrence is the
//! same bit-parallel LLCS as the single-token scorer, except the addition
//! operands are masked by the group's gate so a carry produced in one
//! lane dies at that lane's top bit instead of corrupting its neighbour.
//! The subtraction term needs no masking: `U` is always a subset of `S`,
//! so no borrow ever crosses a lane boundary.

use crate::options::SearchOptions;
use crate::score::alphabet::AlphabetMap;
use crate::score::llcs::score_single;
use crate::score::pack::TokenGroup;
use crate::score::{common_prefix_len, rel_size_ok, similarity, BitMask, ScoreType};

/// Score every token of `group` against `field` in one sweep, pushing one
/// score per lane into `scores` (cleared first).
pub fn score_pack(group: &TokenGroup, field: &str, opts: &SearchOptions, scores: &mut Vec<ScoreType>) {
    scores.clear();

    let map = match &group.map {
        AlphabetMap::Bits(map) => map,
        // Solo long token: no lanes to share, take the single-token path.
        AlphabetMap::Positions(_) => {
            scores.push(score_single(&group.tokens[0], field, &group.map, opts));
            return;
        }
    };

    let n = field.chars().count();
    let gate = group.gate;
    let mut s: BitMask = !0;
    for c in field.chars() {
        if let Some(&cm) = map.get(&c) {
            let u = s & cm;
            s = ((s & gate) + (u & gate)) | (s - u);
        }
    }
    s = !s;

    for lane in 0..group.lanes() {
        let token = &group.tokens[lane];
        let m = group.lengths[lane];
        if n == 0 || !rel_size_ok(m, n, opts.token_min_rel_size, opts.token_max_rel_size) {
            scores.push(0.0);
            continue;
        }
        let prefix = common_prefix_len(token, field);
        if prefix == m.min(n) {
            scores.push(similarity(prefix, m, n, prefix, opts.bonus_match_start));
            continue;
        }
        let lane_bits = (s >> group.offsets[lane]) & ((1 << m) - 1);
        let llcs = prefix + (lane_bits & !((1 << prefix) - 1)).count_ones() as usize;
        scores.push(similarity(llcs, m, n, prefix, opts.bonus_match_start));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::pack::pack_tokens;

    fn opts() -> SearchOptions {
        SearchOptions::default()
    }

    fn packed_scores(words: &[&str], field: &str) -> Vec<ScoreType> {
        let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let groups = pack_tokens(&tokens);
        assert_eq!(groups.len(), 1, "test tokens should fit one group");
        let mut out = Vec::new();
        score_pack(&groups[0], field, &opts(), &mut out);
        out
    }

    fn single_scores(words: &[&str], field: &str) -> Vec<ScoreType> {
        let o = opts();
        words
            .iter()
            .map(|w| score_single(w, field, &AlphabetMap::bits_of(w), &o))
            .collect()
    }

    #[test]
    fn packed_equals_individual() {
        let cases: &[(&[&str], &str)] = &[
            (&["paint", "my", "wall"], "painting"),
            (&["paint", "my", "wall"], "wall"),
            (&["davinci", "brown"], "brown"),
            (&["uni", "hi", "code"], "university"),
            (&["aa", "ab", "ba"], "abab"),
        ];
        for (words, field) in cases {
            let packed = packed_scores(words, field);
            let single = single_scores(words, field);
            for (i, (p, s)) in packed.iter().zip(&single).enumerate() {
                assert_eq!(p, s, "lane {i} of {words:?} against {field:?}");
            }
        }
    }

    #[test]
    fn lane_order_does_not_change_scores() {
        let field = "repainting";
        let forward = packed_scores(&["paint", "my", "wall"], field);
        let backward = packed_scores(&["wall", "my", "paint"], field);
        assert_eq!(forward[0], backward[2]);
        assert_eq!(forward[1], backward[1]);
        assert_eq!(forward[2], backward[0]);
    }

    #[test]
    fn gated_lane_scores_zero_without_disturbing_others() {
        // "of" is far too short for the long field, "honor" is not.
        let scores = packed_scores(&["of", "honor"], "honorificabilitudinitatibus");
        assert_eq!(scores[0], 0.0);
        assert!(scores[1] > 0.0);
    }

    #[test]
    fn solo_long_group_delegates_to_single_path() {
        let long = "abcdefghij".repeat(7);
        let groups = pack_tokens(&[long.clone()]);
        let mut out = Vec::new();
        score_pack(&groups[0], &long, &opts(), &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0] > 0.0);
    }

    #[test]
    fn empty_field_scores_every_lane_zero() {
        let scores = packed_scores(&["abc", "de"], "");
        assert_eq!(scores, vec![0.0, 0.0]);
    }
}
