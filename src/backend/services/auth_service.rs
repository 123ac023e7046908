// src/backend/services/auth_service.rs
// The credential gate: login verification, session issuance and credential
// rotation against the singleton admin pair.

use crate::{
    error::PortfolioError,
    metrics,
    models::{
        common::Timestamp,
        credentials::{AdminCredentials, SessionClaims},
    },
    storage,
    utils::crypto,
};
use subtle::ConstantTimeEq;

pub const ADMIN_ROLE: &str = "admin";
/// Fixed session lifetime, 24 hours.
pub const SESSION_TTL_MS: u64 = 24 * 60 * 60 * 1_000;
const MIN_PASSWORD_CHARS: usize = 8;

/// Compares a presented pair against the current stored pair. Mismatch is a
/// normal `false` result, never an error.
///
/// While no real pair has been provisioned, the bootstrap pair from the
/// install args is consulted instead; every such use is logged so it cannot
/// silently linger in production.
pub fn verify_login(username: &str, password: &str) -> bool {
    if let Some(stored) = storage::get_credentials() {
        return stored.username == username
            && crypto::verify_password(password, &stored.password_hash);
    }

    match storage::get_bootstrap_credentials() {
        Some(bootstrap) => {
            let matched = bootstrap.username == username
                && bool::from(bootstrap.password.as_bytes().ct_eq(password.as_bytes()));
            if matched {
                crate::debug_log!(
                    "WARN: bootstrap credentials accepted; provision a real pair immediately"
                );
            }
            matched
        }
        None => false,
    }
}

/// Verifies a login and, on success, issues a signed 24h session token.
/// Returns `Ok(None)` for bad credentials — the 401 envelope, not an
/// internal failure.
pub fn login(
    username: &str,
    password: &str,
    now: Timestamp,
) -> Result<Option<(String, SessionClaims)>, PortfolioError> {
    let authenticated = verify_login(username, password);
    metrics::record_login_attempt(authenticated);
    if !authenticated {
        crate::debug_log!("Failed admin login attempt for username '{}'", username);
        return Ok(None);
    }

    let claims = SessionClaims {
        username: username.to_string(),
        role: ADMIN_ROLE.to_string(),
        issued_at: now,
        expires_at: now + SESSION_TTL_MS,
    };
    let key = storage::get_signing_key();
    let token = crypto::sign_session(&claims, &key)?;
    Ok(Some((token, claims)))
}

/// Rotates the credential pair. Fails closed: the old pair must verify and
/// the new password must be at least 8 characters, otherwise nothing is
/// written. The overwrite itself is a single cell write; previously issued
/// tokens stay valid until their natural expiry (no revocation here).
pub fn rotate_credentials(
    current_username: &str,
    current_password: &str,
    new_username: Option<String>,
    new_password: &str,
    now: Timestamp,
) -> Result<(), PortfolioError> {
    if !verify_login(current_username, current_password) {
        return Err(PortfolioError::NotAuthorized(
            "Current credentials are incorrect".to_string(),
        ));
    }
    if new_password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(PortfolioError::InvalidInput(
            "New password must be at least 8 characters long".to_string(),
        ));
    }

    let username = new_username
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| current_username.to_string());
    let password_hash = crypto::hash_password(new_password)?;

    storage::set_credentials(AdminCredentials {
        username,
        password_hash,
        rotated_at: now,
    })?;
    metrics::record_credential_rotation();
    crate::debug_log!("Admin credentials rotated");
    Ok(())
}
