// src/backend/storage/metrics.rs
use crate::metrics::PortfolioMetrics;
use crate::storage::memory::{get_metrics_memory, Memory};
use crate::storage::storable::Cbor;
use ic_stable_structures::StableCell;
use std::cell::RefCell;

type StorableMetrics = Cbor<PortfolioMetrics>;

thread_local! {
    /// Global canister counters
    static METRICS_CELL: RefCell<StableCell<StorableMetrics, Memory>> = RefCell::new(
        StableCell::init(get_metrics_memory(), Cbor(PortfolioMetrics::default()))
            .expect("Failed to initialize metrics stable cell")
    );
}

/// Helper function to get metrics.
pub fn get_metrics() -> PortfolioMetrics {
    METRICS_CELL.with(|cell| cell.borrow().get().0.clone())
}

/// Helper function to update metrics. Counter drift on a failed write is
/// tolerated; counters are observability, not contract.
pub fn update_metrics<F>(update_fn: F)
where
    F: FnOnce(&mut PortfolioMetrics),
{
    METRICS_CELL.with(|cell| {
        let mut metrics = cell.borrow().get().0.clone();
        update_fn(&mut metrics);
        if let Err(e) = cell.borrow_mut().set(Cbor(metrics)) {
            crate::debug_log!("WARN: failed to update metrics: {:?}", e);
        }
    });
}
