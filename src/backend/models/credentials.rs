// src/backend/models/credentials.rs
use crate::models::common::Timestamp;
use candid::CandidType;
use serde::{Deserialize, Serialize};

/// The single admin credential pair. Held in one stable cell, overwritten
/// wholesale on rotation; no history is retained.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    /// Salted PBKDF2-HMAC-SHA256 hash, encoded as
    /// `pbkdf2-sha256$<iterations>$<salt-hex>$<digest-hex>`. Never plaintext.
    pub password_hash: String,
    pub rotated_at: Timestamp,
}

/// Bootstrap pair supplied via canister init args. Only consulted while no
/// real credential record has ever been provisioned.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct BootstrapCredentials {
    pub username: String,
    pub password: String,
}

/// Claims asserted by a signed admin session token.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionClaims {
    pub username: String,
    pub role: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}
