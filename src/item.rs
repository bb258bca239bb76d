//! Record types: the `Searchable` seam, indexed records, and results.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::field::{collect_values, FieldPath};
use crate::score::ScoreType;

/// A record the engine can search.
///
/// Implementors hand out the string values sitting at a field path.
/// Plain strings ignore the path and expose themselves; JSON values
/// traverse it.
pub trait Searchable: Send + Sync {
    /// Append every value at `path` to `out`.
    fn collect_field(&self, path: &FieldPath, out: &mut Vec<String>);
}

impl Searchable for String {
    fn collect_field(&self, _path: &FieldPath, out: &mut Vec<String>) {
        out.push(self.clone());
    }
}

impl Searchable for &'static str {
    fn collect_field(&self, _path: &FieldPath, out: &mut Vec<String>) {
        out.push((*self).to_owned());
    }
}

impl Searchable for Value {
    fn collect_field(&self, path: &FieldPath, out: &mut Vec<String>) {
        collect_values(self, path, out);
    }
}

/// A record plus its pre-normalised per-field token lists.
///
/// Built when the source is installed, rebuilt whenever the source or
/// the key list changes.
pub(crate) struct IndexedItem {
    pub(crate) item: Arc<dyn Searchable>,
    /// One token list per key, normalised, filtered and truncated.
    pub(crate) fields: Vec<Vec<String>>,
    pub(crate) sort_key: String,
}

/// One search hit.
#[derive(Clone)]
pub struct SearchResult {
    /// The original record.
    pub item: Arc<dyn Searchable>,
    /// Item score, rounded to the configured quantum.
    pub score: ScoreType,
    /// Index (into the key list) of the best-scoring field.
    pub matched_field: usize,
    /// Tie-break key: the first field's tokens joined.
    pub sort_key: String,
}

impl fmt::Debug for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchResult")
            .field("score", &self.score)
            .field("matched_field", &self.matched_field)
            .field("sort_key", &self.sort_key)
            .finish()
    }
}
