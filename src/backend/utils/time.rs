use crate::models::common::{Timestamp, TimestampNs};

/// Returns the current Internet Computer time as nanoseconds since epoch.
pub fn get_current_time_ns() -> TimestampNs {
    ic_cdk::api::time()
}

/// Returns the current time in epoch milliseconds, the resolution the
/// record timestamps use.
pub fn now_ms() -> Timestamp {
    get_current_time_ns() / 1_000_000
}
