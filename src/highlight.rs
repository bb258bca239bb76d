//! On-demand highlighting: pair query tokens with field tokens, align
//! each pair locally, and project the ranges back onto the original
//! text.
//!
//! Scoring and pairing happen on the normalised text; the char mapping
//! produced during normalisation carries every range back to the
//! caller's string, so accents and collapsed whitespace never shift the
//! marks.

use crate::normalize::normalize_with_char_mapping;
use crate::options::SearchOptions;
use crate::query::Query;
use crate::score::align::Aligner;
use crate::score::alphabet::AlphabetMap;
use crate::score::assign::{match_tokens, ScoreMatrix};
use crate::score::llcs::score_single;

/// Compute the char ranges of `text` to mark for `query`.
///
/// Ranges are half-open `(start, end)` pairs over the chars of the
/// original `text`, sorted and non-overlapping. An empty query or a
/// text with nothing to match yields no ranges.
pub fn highlight_ranges(query: &str, text: &str, opts: &SearchOptions) -> Vec<(usize, usize)> {
    let (norm, mapping) = normalize_with_char_mapping(text);
    if norm.is_empty() {
        return Vec::new();
    }

    let query = Query::prepare(query, opts);
    if query.is_empty() {
        return Vec::new();
    }
    // Fall back to the fused query when tokenisation left nothing.
    let fused_tokens;
    let query_tokens: &[String] = if query.tokens.is_empty() {
        fused_tokens = [query.fused.clone()];
        &fused_tokens
    } else {
        &query.tokens
    };

    // Field tokens with their char offsets into the normalised text.
    let mut field_tokens: Vec<(usize, &str)> = Vec::new();
    let mut char_pos = 0;
    for tok in norm.split(' ') {
        if !tok.is_empty() {
            field_tokens.push((char_pos, tok));
        }
        char_pos += tok.chars().count() + 1;
    }
    if field_tokens.is_empty() {
        return Vec::new();
    }

    // Pair tokens one-to-one, then align each pair.
    let maps: Vec<AlphabetMap> = query_tokens.iter().map(|t| AlphabetMap::build(t)).collect();
    let mut matrix = ScoreMatrix::zero(query_tokens.len(), field_tokens.len());
    for (row, q_token) in query_tokens.iter().enumerate() {
        for (col, (_, f_token)) in field_tokens.iter().enumerate() {
            matrix.set(row, col, score_single(q_token, f_token, &maps[row], opts));
        }
    }
    let assignment = match_tokens(&matrix, opts);

    let aligner = Aligner::default();
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (row, pair) in assignment.pairs.iter().enumerate() {
        let col = match pair {
            Some(col) => *col,
            None => continue,
        };
        let (offset, f_token) = field_tokens[col];
        for (start, end) in aligner.align(&query_tokens[row], f_token, opts.highlight_bridge_gap) {
            ranges.push((offset + start, offset + end));
        }
    }

    // Project onto the original text and merge touching ranges.
    let mut mapped: Vec<(usize, usize)> = ranges
        .into_iter()
        .filter(|&(start, end)| end > start && end <= mapping.len())
        .map(|(start, end)| (mapping[start], mapping[end - 1] + 1))
        .collect();
    mapped.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(mapped.len());
    for (start, end) in mapped {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::util::wrap_ranges;

    fn marked(query: &str, text: &str) -> String {
        wrap_ranges(text, &highlight_ranges(query, text, &SearchOptions::default()))
    }

    #[test]
    fn single_token_marks_its_field_token() {
        assert_eq!(marked("paint", "wall painting"), "wall [paint]ing");
    }

    #[test]
    fn tokens_pair_one_to_one() {
        assert_eq!(marked("paint wall", "wall painting"), "[wall] [paint]ing");
    }

    #[test]
    fn subsequence_match_is_bridged() {
        assert_eq!(marked("assurance", "insurgence"), "in[surgence]");
    }

    #[test]
    fn ranges_land_on_the_original_accents() {
        // Matching runs on "cafe" but the marks wrap the accented chars.
        assert_eq!(marked("cafe", "Café corner"), "[Café] corner");
    }

    #[test]
    fn collapsed_whitespace_does_not_shift_ranges() {
        assert_eq!(marked("wall", "paint   my   wall"), "paint   my   [wall]");
    }

    #[test]
    fn empty_query_marks_nothing() {
        assert_eq!(marked("", "anything"), "anything");
        assert_eq!(marked("   ", "anything"), "anything");
    }

    #[test]
    fn unrelated_text_marks_nothing() {
        assert_eq!(marked("zebra", "qqqq wwww"), "qqqq wwww");
    }
}
