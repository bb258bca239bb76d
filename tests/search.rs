//! End-to-end search behaviour over the public API.

use std::sync::Arc;

use serde_json::json;
use sift::{SearchEngine, SearchOptions, SearchOptionsBuilder, Searchable};

fn engine_with(options: SearchOptions, keys: &[&str], records: Vec<serde_json::Value>) -> SearchEngine {
    let mut engine = SearchEngine::new(options);
    if !keys.is_empty() {
        engine.set_keys(keys.iter().copied());
    }
    engine.set_source(
        records
            .into_iter()
            .map(|v| Arc::new(v) as Arc<dyn Searchable>)
            .collect(),
    );
    engine
}

#[test]
fn cross_field_query_mixes_both_fields() {
    let engine = engine_with(
        SearchOptions::default(),
        &["title", "author"],
        vec![
            json!({"title": "davinci code", "author": "dawn brown"}),
            json!({"title": "the golden compass", "author": "philip pullman"}),
            json!({"title": "brown bear picnic", "author": "stan berenstain"}),
        ],
    );
    let results = engine.search("davinci brown");
    assert!(!results.is_empty());
    assert_eq!(
        results[0].sort_key, "davinci code",
        "the record matching across both fields should rank first"
    );
}

#[test]
fn results_are_sorted_by_score_then_sort_key() {
    let engine = engine_with(
        SearchOptions::default(),
        &["name"],
        vec![
            json!({"name": "painter colleen"}),
            json!({"name": "painter albert"}),
            json!({"name": "painting"}),
        ],
    );
    let results = engine.search("painter");
    assert!(results.len() >= 2);
    for pair in results.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].sort_key <= pair[1].sort_key),
            "results out of order: {pair:?}"
        );
    }
    // The two exact "painter" records tie and sort lexicographically.
    assert_eq!(results[0].sort_key, "painter albert");
    assert_eq!(results[1].sort_key, "painter colleen");
}

#[test]
fn scores_are_rounded_to_the_quantum() {
    let engine = engine_with(
        SearchOptions::default(),
        &["name"],
        vec![json!({"name": "university"})],
    );
    let results = engine.search("university");
    assert_eq!(results.len(), 1);
    let score = results[0].score;
    let quantised = (score / 0.1).round() * 0.1;
    assert!((score - quantised).abs() < 1e-9, "score {score} is not on the 0.1 grid");
}

#[test]
fn wildcard_paths_reach_nested_authors() {
    let engine = engine_with(
        SearchOptions::default(),
        &["title", "authors.*.name"],
        vec![
            json!({
                "title": "good omens",
                "authors": [{"name": "terry pratchett"}, {"name": "neil gaiman"}],
            }),
            json!({"title": "mort", "authors": [{"name": "terry pratchett"}]}),
        ],
    );
    let results = engine.search("gaiman");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].matched_field, 1);
    assert_eq!(results[0].sort_key, "good omens");
}

#[test]
fn output_limit_caps_results() {
    let records: Vec<_> = (0..20)
        .map(|i| json!({ "name": format!("gardening volume {i}") }))
        .collect();
    let engine = engine_with(
        SearchOptionsBuilder::default().output_limit(5).build().unwrap(),
        &["name"],
        records,
    );
    assert_eq!(engine.search("gardening").len(), 5);
}

#[test]
fn rel_size_gate_buries_tiny_queries_against_huge_tokens() {
    let engine = engine_with(
        SearchOptions::default(),
        &["word"],
        vec![json!({"word": "honorificabilitudinitatibus"})],
    );
    // "of" is gated to zero against the 27-char token; "honor" is not.
    assert!(engine.search("of").is_empty());
    assert!(!engine.search("honor").is_empty());
}

#[test]
fn accented_records_match_plain_queries() {
    let engine = engine_with(
        SearchOptions::default(),
        &["name"],
        vec![json!({"name": "Café Métropole"}), json!({"name": "Tea House"})],
    );
    let results = engine.search("cafe metropole");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].sort_key, "cafe metropole");
}

#[test]
fn fused_only_mode_still_searches() {
    let mut options = SearchOptions::default();
    options.score_per_token = false;
    let engine = engine_with(
        options,
        &["name"],
        vec![json!({"name": "old man river"}), json!({"name": "young woman sea"})],
    );
    let results = engine.search("oldman");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].sort_key, "old man river");
}

#[test]
fn empty_source_and_empty_query_are_total() {
    let engine = engine_with(SearchOptions::default(), &["name"], vec![]);
    assert!(engine.search("anything").is_empty());

    let engine = engine_with(SearchOptions::default(), &["name"], vec![json!({"name": "thing"})]);
    assert!(engine.search("").is_empty());
}

#[test]
fn records_missing_the_field_contribute_nothing() {
    let engine = engine_with(
        SearchOptions::default(),
        &["title"],
        vec![json!({"title": "gardening"}), json!({"unrelated": "gardening"})],
    );
    let results = engine.search("gardening");
    assert_eq!(results.len(), 1);
}

#[test]
fn reversed_token_order_scores_lower() {
    let engine = engine_with(
        SearchOptions::default(),
        &["name"],
        vec![json!({"name": "wall painting"})],
    );
    let in_order = engine.search("wall painting");
    let reversed = engine.search("painting wall");
    assert_eq!(in_order.len(), 1);
    assert_eq!(reversed.len(), 1);
    assert!(
        in_order[0].score > reversed[0].score,
        "in-order {} should beat reversed {}",
        in_order[0].score,
        reversed[0].score
    );
}
