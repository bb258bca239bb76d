//! Small helpers shared by the scorers and their tests.

use crate::options::SearchOptions;
use crate::score::llcs::score;

/// Wrap the given char ranges of `text` in square brackets.
///
/// Handy for eyeballing highlight output in tests:
/// `wrap_ranges("insurgence", &[(2, 10)])` is `"in[surgence]"`.
pub fn wrap_ranges(text: &str, ranges: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(text.len() + 2 * ranges.len());
    let mut ranges = ranges.iter().peekable();
    let mut open = None;
    for (i, c) in text.chars().enumerate() {
        if let Some(&&(start, end)) = ranges.peek() {
            if i == start {
                out.push('[');
                open = Some(end);
            }
        }
        out.push(c);
        if open == Some(i + 1) {
            out.push(']');
            open = None;
            ranges.next();
        }
    }
    if open.is_some() {
        out.push(']');
    }
    out
}

/// Assert that `fields` are ordered by strictly decreasing score against
/// `query`. Test helper.
pub fn assert_order(query: &str, fields: &[&str], opts: &SearchOptions) {
    let scores: Vec<f64> = fields.iter().map(|f| score(query, f, opts)).collect();
    for i in 1..scores.len() {
        assert!(
            scores[i - 1] > scores[i],
            "expected {:?} ({}) to outscore {:?} ({}) for query {query:?}",
            fields[i - 1],
            scores[i - 1],
            fields[i],
            scores[i]
        );
    }
}
