//! Structural comparison of page metadata snapshots.
//!
//! A metadata snapshot is a JSON object capturing a page's structured fields
//! at a point in time. The differ walks the *before* snapshot's own fields in
//! insertion order; fields that only exist in the *after* snapshot are not
//! surfaced. That asymmetry matches what the dashboard history panel renders
//! and is part of the contract, not an oversight.

use serde_json::Value;

use crate::types::DbId;

/// Bookkeeping fields that change on every save and are never shown as
/// metadata differences.
pub const IGNORED_FIELDS: &[&str] = &["publishedAt", "updatedAt", "authorId", "contributorIds"];

/// Human labels for raw metadata keys. Keys missing here pass through
/// unmapped.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("title", "Page Title"),
    ("slug", "Page Slug"),
    ("description", "Description"),
    ("category", "Category"),
    ("tags", "Tags"),
    ("template", "Template"),
    ("status", "Status"),
    ("locale", "Locale"),
];

/// A single field-level difference between two metadata snapshots.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldDifference {
    pub label: String,
    pub previous: Value,
    pub current: Value,
}

/// Map a raw metadata key to its display label.
pub fn field_label(key: &str) -> &str {
    FIELD_LABELS
        .iter()
        .find(|(raw, _)| *raw == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// Compare two metadata snapshots field by field.
///
/// Walks `before`'s fields in insertion order, skipping [`IGNORED_FIELDS`]
/// and fields absent from `after`. Arrays compare element-wise in order:
/// set-equal but reordered arrays are reported as different. Non-object
/// input on either side yields no differences.
pub fn metadata_differences(before: &Value, after: &Value) -> Vec<FieldDifference> {
    let (Some(before_map), Some(after_map)) = (before.as_object(), after.as_object()) else {
        return Vec::new();
    };

    let mut differences = Vec::new();
    for (key, previous) in before_map {
        if IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let Some(current) = after_map.get(key) else {
            continue;
        };
        if !values_equal(previous, current) {
            differences.push(FieldDifference {
                label: field_label(key).to_string(),
                previous: previous.clone(),
                current: current.clone(),
            });
        }
    }
    differences
}

/// Strict value equality with the array rule spelled out: arrays are equal
/// only when lengths match and elements are pairwise equal in the same order.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        _ => a == b,
    }
}

/// Extract the page id a metadata snapshot belongs to.
///
/// Returns `None` when the snapshot is not an object, lacks an `id` field,
/// or the field does not parse as a UUID. Revert validation treats `None`
/// as historical data corruption and fails loudly rather than guessing.
pub fn snapshot_page_id(snapshot: &Value) -> Option<DbId> {
    match snapshot.get("id")? {
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
