//! Input normalisation: case folding, diacritic removal, whitespace
//! collapsing.
//!
//! Every string entering the scorers goes through [`normalize`] first:
//! lowercase, then NFD decomposition with combining marks stripped (so
//! `"Café"` and `"cafe"` meet in the middle), then whitespace runs
//! collapsed to single spaces with the ends trimmed. The mapping variant
//! remembers, for every produced char, which original char it came from,
//! so highlight ranges computed on normalised text can be projected back.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalise `s` for matching. Idempotent.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for ch in s.chars() {
        for lowered in ch.to_lowercase() {
            for folded in lowered.nfd() {
                if is_combining_mark(folded) {
                    continue;
                }
                if folded.is_whitespace() {
                    pending_space = true;
                } else {
                    if pending_space && !out.is_empty() {
                        out.push(' ');
                    }
                    pending_space = false;
                    out.push(folded);
                }
            }
        }
    }
    out
}

/// Normalise `s` and return, per produced char, the index of the
/// original char it derives from.
pub fn normalize_with_char_mapping(s: &str) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(s.len());
    let mut mapping = Vec::with_capacity(s.len());
    let mut pending_space: Option<usize> = None;
    for (orig_idx, ch) in s.chars().enumerate() {
        for lowered in ch.to_lowercase() {
            for folded in lowered.nfd() {
                if is_combining_mark(folded) {
                    continue;
                }
                if folded.is_whitespace() {
                    pending_space.get_or_insert(orig_idx);
                } else {
                    if let Some(space_idx) = pending_space.take() {
                        if !out.is_empty() {
                            out.push(' ');
                            mapping.push(space_idx);
                        }
                    }
                    out.push(folded);
                    mapping.push(orig_idx);
                }
            }
        }
    }
    (out, mapping)
}

/// Split a normalised string into its space-separated tokens.
pub fn tokenize(s: &str) -> impl Iterator<Item = &str> {
    s.split(' ').filter(|t| !t.is_empty())
}

/// Cut `s` down to at most `max` chars.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
