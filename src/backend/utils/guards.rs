// src/backend/utils/guards.rs
use crate::error::PortfolioError;
use crate::models::common::Timestamp;
use crate::models::credentials::SessionClaims;
use crate::storage;
use crate::utils::crypto;

/// Checks the bearer token presented with a mutating call.
///
/// # Errors
///
/// Returns `PortfolioError::NotAuthorized` for a missing, forged or expired
/// token; the three cases are indistinguishable to the caller.
pub fn require_admin_session(token: &str, now: Timestamp) -> Result<SessionClaims, PortfolioError> {
    let key = storage::get_signing_key();
    crypto::verify_session_token(token, &key, now)
}
