// src/backend/models/document.rs
use crate::models::common::{RecordId, Timestamp};
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names managed by the engine itself. They are stripped from every
/// caller-supplied payload so identity and provenance can never be forged
/// or erased through the field map. The names match the JSON keys the
/// admin frontend sends.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Caller-supplied field value. The engine treats entity fields as opaque
/// tagged values and has no knowledge of their semantic type.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
}

/// Ordered field map. BTreeMap keeps key order deterministic across
/// encode/decode round trips.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A stored record: an immutable identifier, two engine-managed timestamps
/// and the caller's schema-light field map.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Document {
    pub id: RecordId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub fields: FieldMap,
}

impl Document {
    /// Builds a freshly created record. Both timestamps are set to `now`;
    /// reserved keys must already be stripped from `fields`.
    pub fn new(id: RecordId, fields: FieldMap, now: Timestamp) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    /// Merges planned assignments over the stored field map and refreshes
    /// the modification timestamp. Last write wins per key; keys absent
    /// from `assignments` keep their prior value.
    pub fn apply_assignments(&mut self, assignments: &FieldMap, touched_at: Timestamp) {
        for (key, value) in assignments {
            self.fields.insert(key.clone(), value.clone());
        }
        self.updated_at = touched_at;
    }
}

/// Removes the engine-managed keys from a caller payload, silently.
pub fn strip_reserved_fields(mut fields: FieldMap) -> FieldMap {
    for key in RESERVED_FIELDS {
        fields.remove(key);
    }
    fields
}

/// Stable sort by the optional numeric `order` field, defaulting to 0.
/// Pure caller-side convenience for the listing endpoints; the storage
/// layer itself does not promise any ordering.
pub fn sorted_by_order(mut records: Vec<Document>) -> Vec<Document> {
    records.sort_by(|a, b| {
        order_value(a)
            .partial_cmp(&order_value(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    records
}

fn order_value(record: &Document) -> f64 {
    match record.fields.get("order") {
        Some(FieldValue::Int(n)) => *n as f64,
        Some(FieldValue::Float(n)) => *n,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn strip_removes_exactly_the_reserved_keys() {
        let mut fields = FieldMap::new();
        fields.insert("id".to_string(), text("forged"));
        fields.insert("createdAt".to_string(), text("forged"));
        fields.insert("updatedAt".to_string(), text("forged"));
        fields.insert("title".to_string(), text("kept"));

        let stripped = strip_reserved_fields(fields);
        assert_eq!(stripped.len(), 1);
        assert_eq!(stripped.get("title"), Some(&text("kept")));
    }

    #[test]
    fn apply_assignments_leaves_unlisted_fields_untouched() {
        let mut fields = FieldMap::new();
        fields.insert("title".to_string(), text("X"));
        fields.insert("tags".to_string(), FieldValue::List(vec![text("a")]));
        let mut doc = Document::new("01ARZ".to_string(), fields, 1_000);

        let mut assignments = FieldMap::new();
        assignments.insert(
            "tags".to_string(),
            FieldValue::List(vec![text("a"), text("b")]),
        );
        doc.apply_assignments(&assignments, 2_000);

        assert_eq!(doc.fields.get("title"), Some(&text("X")));
        assert_eq!(
            doc.fields.get("tags"),
            Some(&FieldValue::List(vec![text("a"), text("b")]))
        );
        assert_eq!(doc.created_at, 1_000);
        assert_eq!(doc.updated_at, 2_000);
    }

    #[test]
    fn sorted_by_order_is_stable_and_defaults_to_zero() {
        let make = |id: &str, order: Option<i64>| {
            let mut fields = FieldMap::new();
            if let Some(n) = order {
                fields.insert("order".to_string(), FieldValue::Int(n));
            }
            Document::new(id.to_string(), fields, 0)
        };

        let sorted = sorted_by_order(vec![
            make("c", Some(2)),
            make("a", None),
            make("b", Some(0)),
            make("d", Some(1)),
        ]);
        let ids: Vec<&str> = sorted.iter().map(|d| d.id.as_str()).collect();
        // "a" (implicit 0) keeps its position ahead of "b" (explicit 0).
        assert_eq!(ids, vec!["a", "b", "d", "c"]);
    }
}
