// src/backend/services/document_service.rs
// The partial-update engine. Every entity endpoint is a thin binding over
// these functions; the engine itself knows nothing about entity semantics.

use crate::{
    error::PortfolioError,
    metrics,
    models::{
        common::{Collection, RecordId, Timestamp},
        document::{strip_reserved_fields, Document, FieldMap},
    },
    storage,
    utils::crypto::generate_record_id,
};

/// The minimal mutation computed for a partial update: the caller's
/// surviving field assignments plus the unconditional modification stamp.
#[derive(Clone, Debug, PartialEq)]
pub struct MutationPlan {
    pub record_id: RecordId,
    pub assignments: FieldMap,
    pub touched_at: Timestamp,
}

/// Creates a record: fresh identifier, both timestamps set to `now`, caller
/// fields stored verbatim (minus the reserved keys, which the caller can
/// never supply).
pub fn create_record(
    collection: Collection,
    fields: FieldMap,
    now: Timestamp,
) -> Result<Document, PortfolioError> {
    let fields = strip_reserved_fields(fields);
    let id = generate_record_id(now)?;
    let document = Document::new(id, fields, now);
    storage::insert_document(collection, &document);
    metrics::record_document_created(now);
    Ok(document)
}

/// Translates a sparse payload into a `MutationPlan`. Pure; storage is not
/// consulted. Reserved keys are silently dropped, and the modification
/// stamp is appended unconditionally, overriding any caller-supplied value.
///
/// # Errors
///
/// Returns `PortfolioError::InvalidInput` for a literally empty payload. A
/// payload that becomes empty after stripping still proceeds as a
/// timestamp-only touch.
pub fn plan_update(
    record_id: &RecordId,
    fields: FieldMap,
    now: Timestamp,
) -> Result<MutationPlan, PortfolioError> {
    if fields.is_empty() {
        return Err(PortfolioError::InvalidInput(
            "Update payload must not be empty".to_string(),
        ));
    }
    Ok(MutationPlan {
        record_id: record_id.clone(),
        assignments: strip_reserved_fields(fields),
        touched_at: now,
    })
}

/// Applies a plan as a single per-record write. Missing records are
/// rejected with NotFound rather than upserted.
pub fn apply_update(
    collection: Collection,
    plan: &MutationPlan,
) -> Result<Document, PortfolioError> {
    let mut document = storage::get_document(collection, &plan.record_id).ok_or_else(|| {
        PortfolioError::NotFound(format!(
            "{} {} does not exist",
            collection.singular(),
            plan.record_id
        ))
    })?;
    document.apply_assignments(&plan.assignments, plan.touched_at);
    storage::insert_document(collection, &document);
    metrics::record_document_updated(plan.touched_at);
    Ok(document)
}

/// Plan-and-apply convenience used by the update endpoints.
pub fn update_record(
    collection: Collection,
    record_id: &RecordId,
    fields: FieldMap,
    now: Timestamp,
) -> Result<Document, PortfolioError> {
    let plan = plan_update(record_id, fields, now)?;
    apply_update(collection, &plan)
}

pub fn get_record(collection: Collection, id: &RecordId) -> Option<Document> {
    storage::get_document(collection, id)
}

pub fn list_records(collection: Collection) -> Vec<Document> {
    storage::list_documents(collection)
}

/// Unconditional, idempotent delete. Deleting an absent id is reported for
/// observability but is not an error.
pub fn delete_record(collection: Collection, id: &RecordId, now: Timestamp) -> bool {
    match storage::remove_document(collection, id) {
        Some(_) => {
            metrics::record_document_deleted(now);
            true
        }
        None => {
            crate::debug_log!(
                "WARN: delete called for non-existent {} id: {}",
                collection.name(),
                id
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::FieldValue;
    use crate::utils::rng::seed_rng;
    use proptest::prelude::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn fields(pairs: &[(&str, FieldValue)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn create_update_delete_flow() {
        seed_rng([11u8; 32]);
        let created = create_record(
            Collection::Projects,
            fields(&[
                ("title", text("X")),
                ("tags", FieldValue::List(vec![text("a")])),
            ]),
            1_000,
        )
        .unwrap();
        assert_eq!(created.id.len(), 26);
        assert_eq!(created.created_at, created.updated_at);

        let updated = update_record(
            Collection::Projects,
            &created.id,
            fields(&[("tags", FieldValue::List(vec![text("a"), text("b")]))]),
            2_000,
        )
        .unwrap();
        assert_eq!(updated.fields.get("title"), Some(&text("X")));
        assert_eq!(
            updated.fields.get("tags"),
            Some(&FieldValue::List(vec![text("a"), text("b")]))
        );
        assert_eq!(updated.created_at, 1_000);
        assert!(updated.updated_at > created.updated_at);

        assert!(delete_record(Collection::Projects, &created.id, 3_000));
        assert!(get_record(Collection::Projects, &created.id).is_none());
        // Idempotent at the contract level.
        assert!(!delete_record(Collection::Projects, &created.id, 3_000));
    }

    #[test]
    fn update_cannot_change_identity() {
        seed_rng([12u8; 32]);
        let created =
            create_record(Collection::Books, fields(&[("title", text("Dune"))]), 1_000).unwrap();

        let updated = update_record(
            Collection::Books,
            &created.id,
            fields(&[("id", text("forged-id")), ("author", text("Herbert"))]),
            2_000,
        )
        .unwrap();
        assert_eq!(updated.id, created.id);
        assert!(!updated.fields.contains_key("id"));
        assert_eq!(updated.fields.get("author"), Some(&text("Herbert")));
        assert!(get_record(Collection::Books, &created.id).is_some());
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let err = update_record(
            Collection::Books,
            &"01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string(),
            fields(&[("title", text("ghost"))]),
            1_000,
        )
        .unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound(_)));
    }

    #[test]
    fn empty_payload_is_rejected() {
        let err = plan_update(&"some-id".to_string(), FieldMap::new(), 1_000).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidInput(_)));
    }

    #[test]
    fn reserved_only_payload_is_a_timestamp_touch() {
        seed_rng([13u8; 32]);
        let created = create_record(
            Collection::Experiences,
            fields(&[("role", text("Engineer"))]),
            1_000,
        )
        .unwrap();

        let updated = update_record(
            Collection::Experiences,
            &created.id,
            fields(&[("createdAt", text("forged"))]),
            2_000,
        )
        .unwrap();
        assert_eq!(updated.created_at, 1_000);
        assert_eq!(updated.updated_at, 2_000);
        assert_eq!(updated.fields.get("role"), Some(&text("Engineer")));
        assert!(!updated.fields.contains_key("createdAt"));
    }

    #[test]
    fn identical_payloads_get_distinct_identifiers() {
        seed_rng([14u8; 32]);
        let payload = fields(&[("name", text("Rust"))]);
        let a = create_record(Collection::Skills, payload.clone(), 1_000).unwrap();
        let b = create_record(Collection::Skills, payload, 1_000).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.fields, b.fields);
    }

    #[test]
    fn listing_returns_created_records() {
        seed_rng([15u8; 32]);
        let created = create_record(
            Collection::Locations,
            fields(&[("name", text("Kyoto"))]),
            1_000,
        )
        .unwrap();
        let listed = list_records(Collection::Locations);
        assert!(listed.iter().any(|d| d.id == created.id));
    }

    // Property: an update rewrites exactly the payload's non-reserved keys
    // plus the modification stamp; every other field keeps its prior value.
    fn field_value_strategy() -> impl Strategy<Value = FieldValue> {
        prop_oneof![
            Just(FieldValue::Null),
            any::<bool>().prop_map(FieldValue::Bool),
            any::<i64>().prop_map(FieldValue::Int),
            "[a-z0-9 ]{0,12}".prop_map(FieldValue::Text),
        ]
    }

    fn field_map_strategy() -> impl Strategy<Value = FieldMap> {
        proptest::collection::btree_map("[a-zA-Z]{1,8}", field_value_strategy(), 0..6)
    }

    proptest! {
        #[test]
        fn merge_preserves_unlisted_fields(
            stored in field_map_strategy(),
            payload in field_map_strategy(),
        ) {
            let stored = strip_reserved_fields(stored);
            let mut document = Document::new("01TEST".to_string(), stored.clone(), 1_000);

            match plan_update(&document.id, payload.clone(), 2_000) {
                Err(_) => prop_assert!(payload.is_empty()),
                Ok(plan) => {
                    document.apply_assignments(&plan.assignments, plan.touched_at);

                    for (key, value) in &plan.assignments {
                        prop_assert_eq!(document.fields.get(key), Some(value));
                    }
                    for (key, value) in &stored {
                        if !plan.assignments.contains_key(key) {
                            prop_assert_eq!(document.fields.get(key), Some(value));
                        }
                    }
                    prop_assert_eq!(document.fields.len(),
                        stored.keys().chain(plan.assignments.keys()).collect::<std::collections::BTreeSet<_>>().len());
                    prop_assert_eq!(document.created_at, 1_000);
                    prop_assert_eq!(document.updated_at, 2_000);
                }
            }
        }
    }
}
