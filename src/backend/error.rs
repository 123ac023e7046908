// src/backend/error.rs
use candid::CandidType;
use serde::Deserialize;
use thiserror::Error;

/// Error taxonomy for the portfolio backend. Variants map onto the HTTP
/// status classes the admin frontend expects: `InvalidInput` -> 400,
/// `NotAuthorized` -> 401, `NotFound` -> 404, everything else -> 500.
#[derive(CandidType, Deserialize, Error, Debug, PartialEq, Eq)]
pub enum PortfolioError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal canister error: {0}")]
    InternalError(String),
}
