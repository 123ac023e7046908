// src/backend/metrics.rs
use crate::models::common::{Collection, Timestamp};
use crate::storage::{document_count, update_metrics};
use candid::CandidType;
use serde::{Deserialize, Serialize};

/// Operational counters for the admin dashboard.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, Default)]
pub struct PortfolioMetrics {
    pub documents_created_total: u64,
    pub documents_updated_total: u64,
    pub documents_deleted_total: u64,
    pub login_success_total: u64,
    pub login_failure_total: u64,
    pub credential_rotations_total: u64,
    pub last_activity_at: Option<Timestamp>,
}

// --- Metrics Update Helpers ---

pub fn record_document_created(now: Timestamp) {
    update_metrics(|metrics| {
        metrics.documents_created_total = metrics.documents_created_total.saturating_add(1);
        metrics.last_activity_at = Some(now);
    });
}

pub fn record_document_updated(now: Timestamp) {
    update_metrics(|metrics| {
        metrics.documents_updated_total = metrics.documents_updated_total.saturating_add(1);
        metrics.last_activity_at = Some(now);
    });
}

pub fn record_document_deleted(now: Timestamp) {
    update_metrics(|metrics| {
        metrics.documents_deleted_total = metrics.documents_deleted_total.saturating_add(1);
        metrics.last_activity_at = Some(now);
    });
}

pub fn record_login_attempt(success: bool) {
    update_metrics(|metrics| {
        if success {
            metrics.login_success_total = metrics.login_success_total.saturating_add(1);
        } else {
            metrics.login_failure_total = metrics.login_failure_total.saturating_add(1);
        }
    });
}

pub fn record_credential_rotation() {
    update_metrics(|metrics| {
        metrics.credential_rotations_total = metrics.credential_rotations_total.saturating_add(1);
    });
}

/// Live per-collection document counts, read straight from the maps.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct CollectionCount {
    pub collection: Collection,
    pub count: u64,
}

pub fn collection_counts() -> Vec<CollectionCount> {
    Collection::ALL
        .iter()
        .map(|&collection| CollectionCount {
            collection,
            count: document_count(collection),
        })
        .collect()
}
