//! Sift is an approximate string-matching search library for Rust.
//!
//! It ranks structured records against a free-form query the way an
//! autocomplete box needs it: per-token similarity built on a
//! bit-parallel longest-common-subsequence kernel, cross-field
//! aggregation with position decay, and on-demand highlight ranges from
//! a local aligner.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use sift::{FieldPath, SearchEngine, SearchOptions, Searchable};
//!
//! let mut engine = SearchEngine::new(SearchOptions::default());
//! engine.set_keys(["title", "author"]);
//! engine.set_source(vec![
//!     Arc::new(json!({"title": "The Da Vinci Code", "author": "Dan Brown"})) as Arc<dyn Searchable>,
//!     Arc::new(json!({"title": "The Name of the Rose", "author": "Umberto Eco"})) as Arc<dyn Searchable>,
//! ]);
//!
//! let results = engine.search("davinci");
//! assert_eq!(results.len(), 1);
//! assert!(results[0].sort_key.contains("vinci"));
//!
//! let _ = FieldPath::parse("authors.*.name");
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod engine;
pub mod field;
pub mod highlight;
pub mod interactive;
pub mod item;
pub mod normalize;
pub mod options;
pub mod query;
pub mod score;

pub use crate::engine::SearchEngine;
pub use crate::field::FieldPath;
pub use crate::highlight::highlight_ranges;
pub use crate::interactive::{LiveResults, LiveSearch};
pub use crate::item::{SearchResult, Searchable};
pub use crate::options::{SearchOptions, SearchOptionsBuilder};
pub use crate::query::Query;
pub use crate::score::ScoreType;
