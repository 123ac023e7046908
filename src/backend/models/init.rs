// src/backend/models/init.rs
use candid::CandidType;
use serde::Deserialize;

/// Install-time configuration. The bootstrap pair exists only to log into a
/// freshly deployed canister before a real credential pair has been
/// provisioned; rotate it away immediately after first login.
#[derive(CandidType, Deserialize, Debug, Default)]
pub struct InitArgs {
    pub bootstrap_username: Option<String>,
    pub bootstrap_password: Option<String>,
}
