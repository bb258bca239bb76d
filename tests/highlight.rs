//! Highlight ranges over the public API.

use sift::score::util::wrap_ranges;
use sift::{highlight_ranges, SearchOptions};

fn marked(query: &str, text: &str) -> String {
    wrap_ranges(text, &highlight_ranges(query, text, &SearchOptions::default()))
}

#[test]
fn ranges_are_sorted_and_disjoint() {
    let ranges = highlight_ranges("paint wall", "wall painting supplies", &SearchOptions::default());
    assert!(!ranges.is_empty());
    for pair in ranges.windows(2) {
        assert!(pair[0].1 <= pair[1].0, "ranges overlap: {pair:?}");
    }
}

#[test]
fn multi_token_queries_mark_each_matched_token() {
    assert_eq!(marked("paint wall", "wall painting"), "[wall] [paint]ing");
}

#[test]
fn subsequence_alignment_bridges_small_gaps() {
    assert_eq!(marked("assurance", "insurgence"), "in[surgence]");
}

#[test]
fn accents_in_the_original_stay_highlighted() {
    assert_eq!(marked("metropole", "Café Métropole"), "Café [Métropole]");
}

#[test]
fn unrelated_text_is_untouched() {
    assert_eq!(marked("zebra", "plain old text"), "plain old text");
}

#[test]
fn each_field_token_is_used_at_most_once() {
    // Two query tokens competing for one field token: only one wins,
    // the other pairs with the remaining token.
    let out = marked("paint painter", "painter paints");
    let opened = out.matches('[').count();
    assert_eq!(opened, 2, "both field tokens should carry a mark: {out}");
}
