//! Field projection over records.
//!
//! The service layer lets callers ask for a subset of a record's fields
//! instead of the whole thing. A requested field is either a bare top-level
//! name (`"package"`) or a dot-delimited path into the record's nested data
//! (`"analyses.digests.details"`). The projected result mirrors the nesting
//! the paths imply, and paths sharing a prefix merge into one sub-mapping.
//!
//! Three inputs are distinguished:
//!
//! - `None`: no projection requested, the full record comes back
//! - `Some(&[])`: an explicit empty projection, an empty mapping comes back
//! - `Some(paths)`: each resolvable path contributes its value; paths that
//!   do not resolve contribute nothing and raise nothing

use crate::record::Record;
use serde_json::{Map, Value};

/// Project the requested field paths out of a record.
///
/// See the module docs for the `None` / `Some(&[])` / `Some(paths)`
/// distinction. Resolution descends through mapping keys only; once a
/// path's segments are exhausted the stored value is returned verbatim,
/// sequences included.
///
/// # Example
///
/// ```
/// use stack_analysis_core::{project, AnalysisRecord};
/// use serde_json::json;
///
/// let mut record = AnalysisRecord::new("pypi", "flexmock", "0.10.1");
/// record.analyses.insert("a".to_string(), json!("b"));
///
/// let result = project(Some(["analyses.a", "package"].as_slice()), &record);
/// assert_eq!(result["analyses"], json!({"a": "b"}));
/// assert_eq!(result["package"], json!("flexmock"));
/// ```
#[must_use]
pub fn project(paths: Option<&[&str]>, record: &impl Record) -> Map<String, Value> {
    let Some(paths) = paths else {
        return record.to_map();
    };

    let mut result = Map::new();
    for path in paths {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((first, rest)) = segments.split_first() else {
            continue;
        };
        // A miss at any step drops this path without touching the result.
        let Some(root) = record.field(first) else {
            continue;
        };
        let Some(value) = resolve(&root, rest) else {
            continue;
        };
        insert_at(&mut result, &segments, value);
    }
    result
}

/// Descend through mapping keys; `None` as soon as a segment has nowhere
/// to go. With no segments left the current value is the answer, whatever
/// its shape.
fn resolve(value: &Value, segments: &[&str]) -> Option<Value> {
    match segments.split_first() {
        None => Some(value.clone()),
        Some((head, tail)) => match value {
            Value::Object(map) => map.get(*head).and_then(|v| resolve(v, tail)),
            _ => None,
        },
    }
}

/// Write `value` at the position the segment chain implies, creating
/// intermediate mappings as needed and extending any mapping an earlier
/// path already created. Sibling keys are never discarded.
fn insert_at(target: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let Some((head, tail)) = segments.split_first() else {
        return;
    };
    if tail.is_empty() {
        target.insert((*head).to_string(), value);
        return;
    }
    let slot = target
        .entry((*head).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(inner) = slot {
        insert_at(inner, tail, value);
    }
}
