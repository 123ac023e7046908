// src/backend/lib.rs

pub mod api;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

use models::credentials::BootstrapCredentials;
use models::init::InitArgs;
use std::time::Duration;

// Bring the Candid endpoint types into scope so `export_candid!()` (expanded
// at this module scope) can name them.
use api::{
    BasicResponse, ChangeCredentialsRequest, CreateCommentRequest, LoginRequest, LoginResponse,
};
use error::PortfolioError;
use metrics::{CollectionCount, PortfolioMetrics};
use models::common::RecordId;
use models::credentials::SessionClaims;
use models::document::{Document, FieldMap};

/// Logging that works in both execution contexts: `ic0.debug_print` traps
/// outside the canister, and the unit tests run natively.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        ic_cdk::println!($($arg)*);
        #[cfg(not(target_arch = "wasm32"))]
        std::println!($($arg)*);
    }};
}

/// `raw_rand` is an async inter-canister call, so entropy is pulled from a
/// zero-delay timer rather than from init itself. First boot also mints
/// the session signing key here, once entropy exists.
fn schedule_entropy_seeding() {
    ic_cdk_timers::set_timer(Duration::ZERO, || {
        ic_cdk::spawn(async {
            if let Err(e) = utils::rng::seed_from_ic_entropy().await {
                ic_cdk::println!("ERROR: failed to seed RNG: {:?}", e);
                return;
            }
            if storage::get_signing_key().is_empty() {
                match utils::crypto::generate_signing_key() {
                    Ok(key) => {
                        if let Err(e) = storage::set_signing_key(key) {
                            ic_cdk::println!("ERROR: failed to store signing key: {:?}", e);
                        } else {
                            ic_cdk::println!("Session signing key generated.");
                        }
                    }
                    Err(e) => {
                        ic_cdk::println!("ERROR: failed to generate signing key: {:?}", e);
                    }
                }
            }
        });
    });
}

#[ic_cdk::init]
fn init(args: Option<InitArgs>) {
    if let Some(args) = args {
        if let (Some(username), Some(password)) = (args.bootstrap_username, args.bootstrap_password)
        {
            match storage::set_bootstrap_credentials(Some(BootstrapCredentials {
                username,
                password,
            })) {
                Ok(()) => ic_cdk::println!(
                    "Bootstrap credentials installed; rotate them after first login."
                ),
                Err(e) => ic_cdk::println!("ERROR: failed to store bootstrap pair: {:?}", e),
            }
        }
    }
    schedule_entropy_seeding();
    ic_cdk::println!("Portfolio backend canister initialized.");
}

#[ic_cdk::post_upgrade]
fn post_upgrade() {
    schedule_entropy_seeding();
    ic_cdk::println!("Portfolio backend canister upgraded.");
}

// Export Candid interface
ic_cdk::export_candid!();
