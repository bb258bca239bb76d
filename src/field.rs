//! Dotted field paths into nested records.
//!
//! A path like `"authors.*.name"` walks object keys, branches over every
//! element of an array (or every value of a mapping) at a `*` segment,
//! and collects all leaf values under the final node. Missing
//! intermediate keys simply yield nothing.

use serde_json::Value;

/// A parsed dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
    raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Wildcard,
}

impl FieldPath {
    /// Parse a dotted path. An empty string addresses the record itself.
    pub fn parse(path: &str) -> FieldPath {
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split('.')
                .map(|seg| {
                    if seg == "*" {
                        Segment::Wildcard
                    } else {
                        Segment::Key(seg.to_owned())
                    }
                })
                .collect()
        };
        FieldPath {
            segments,
            raw: path.to_owned(),
        }
    }

    /// The path as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::parse(path)
    }
}

/// Collect every value addressed by `path` inside `value` into `out`.
pub fn collect_values(value: &Value, path: &FieldPath, out: &mut Vec<String>) {
    walk(value, &path.segments, out);
}

fn walk(value: &Value, segments: &[Segment], out: &mut Vec<String>) {
    match segments.split_first() {
        None => leaves(value, out),
        Some((Segment::Key(key), rest)) => {
            if let Value::Object(map) = value {
                if let Some(child) = map.get(key) {
                    walk(child, rest, out);
                }
            }
        }
        Some((Segment::Wildcard, rest)) => match value {
            Value::Array(items) => {
                for item in items {
                    walk(item, rest, out);
                }
            }
            Value::Object(map) => {
                for child in map.values() {
                    walk(child, rest, out);
                }
            }
            _ => {}
        },
    }
}

/// Collect the leaf values under `value`: strings as-is, numbers and
/// booleans stringified, arrays and mappings recursively, nulls skipped.
fn leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Array(items) => {
            for item in items {
                leaves(item, out);
            }
        }
        Value::Object(map) => {
            for child in map.values() {
                leaves(child, out);
            }
        }
        Value::Null => {}
    }
}
