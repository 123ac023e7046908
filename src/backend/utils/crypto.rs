// src/backend/utils/crypto.rs
// Cryptographic utilities: record id generation, password hashing, session
// token signing.

use crate::error::PortfolioError;
use crate::models::common::{RecordId, Timestamp};
use crate::models::credentials::SessionClaims;
use crate::utils::rng::with_rng;
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use ulid::Ulid;

type HmacSha256 = Hmac<Sha256>;

const PBKDF2_SCHEME: &str = "pbkdf2-sha256";
// Iteration count balances adaptive-hash cost against the per-message
// cycle limit of an update call.
const PBKDF2_ITERATIONS: u32 = 10_000;
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;
pub const SIGNING_KEY_LEN: usize = 32;

/// Generates a fresh record identifier: a ULID built from the creation
/// timestamp and 80 bits of seeded randomness.
pub fn generate_record_id(now_ms: Timestamp) -> Result<RecordId, PortfolioError> {
    let mut bytes = [0u8; 16];
    with_rng(|rng| rng.fill_bytes(&mut bytes))?;
    Ok(Ulid::from_parts(now_ms, u128::from_le_bytes(bytes)).to_string())
}

/// Generates a fresh HMAC signing key.
pub fn generate_signing_key() -> Result<Vec<u8>, PortfolioError> {
    let mut key = vec![0u8; SIGNING_KEY_LEN];
    with_rng(|rng| rng.fill_bytes(&mut key))?;
    Ok(key)
}

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PortfolioError> {
    let mut salt = [0u8; SALT_LEN];
    with_rng(|rng| rng.fill_bytes(&mut salt))?;
    Ok(hash_password_with(password, &salt, PBKDF2_ITERATIONS))
}

fn hash_password_with(password: &str, salt: &[u8], iterations: u32) -> String {
    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut digest);
    format!(
        "{PBKDF2_SCHEME}${iterations}${}${}",
        hex::encode(salt),
        hex::encode(digest)
    )
}

/// Verifies a password against an encoded hash. Digest comparison is
/// constant-time; any parse failure is simply a non-match.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (Some(scheme), Some(iterations), Some(salt_hex), Some(digest_hex), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != PBKDF2_SCHEME {
        return false;
    }
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
        return false;
    };
    if expected.len() != DIGEST_LEN {
        return false;
    }

    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut digest);
    digest.as_slice().ct_eq(expected.as_slice()).into()
}

/// Signs session claims into a bearer token: CBOR claims plus an
/// HMAC-SHA256 tag, both hex-encoded, joined by a dot.
pub fn sign_session(claims: &SessionClaims, key: &[u8]) -> Result<String, PortfolioError> {
    if key.is_empty() {
        return Err(PortfolioError::InternalError(
            "Session signing key not initialized".to_string(),
        ));
    }
    let mut payload = Vec::new();
    ciborium::ser::into_writer(claims, &mut payload)
        .map_err(|e| PortfolioError::InternalError(format!("Failed to encode claims: {e}")))?;
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| PortfolioError::InternalError(format!("Failed to key MAC: {e}")))?;
    mac.update(&payload);
    let tag = mac.finalize().into_bytes();
    Ok(format!("{}.{}", hex::encode(&payload), hex::encode(tag)))
}

/// Verifies a presented token: signature validity (constant-time) and
/// expiry. Expired and forged tokens collapse into the same Unauthorized
/// result so callers cannot distinguish them.
pub fn verify_session_token(
    token: &str,
    key: &[u8],
    now: Timestamp,
) -> Result<SessionClaims, PortfolioError> {
    let unauthorized = || PortfolioError::NotAuthorized("Invalid or expired session".to_string());

    if key.is_empty() {
        return Err(unauthorized());
    }
    let (payload_hex, tag_hex) = token.split_once('.').ok_or_else(unauthorized)?;
    let payload = hex::decode(payload_hex).map_err(|_| unauthorized())?;
    let tag = hex::decode(tag_hex).map_err(|_| unauthorized())?;

    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| unauthorized())?;
    mac.update(&payload);
    mac.verify_slice(&tag).map_err(|_| unauthorized())?;

    let claims: SessionClaims =
        ciborium::de::from_reader(payload.as_slice()).map_err(|_| unauthorized())?;
    if now >= claims.expires_at {
        return Err(unauthorized());
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rng::seed_rng;

    fn claims(now: Timestamp) -> SessionClaims {
        SessionClaims {
            username: "kumar".to_string(),
            role: "admin".to_string(),
            issued_at: now,
            expires_at: now + 86_400_000,
        }
    }

    #[test]
    fn password_hash_roundtrip() {
        seed_rng([7u8; 32]);
        let encoded = hash_password("hunter2hunter2").unwrap();
        assert!(encoded.starts_with("pbkdf2-sha256$"));
        assert!(verify_password("hunter2hunter2", &encoded));
        assert!(!verify_password("hunter2hunter3", &encoded));
        assert!(!verify_password("", &encoded));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "plaintext-not-a-hash"));
        assert!(!verify_password("anything", "pbkdf2-sha256$abc$zz$zz"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn record_ids_are_distinct() {
        seed_rng([9u8; 32]);
        let a = generate_record_id(1_700_000_000_000).unwrap();
        let b = generate_record_id(1_700_000_000_000).unwrap();
        assert_eq!(a.len(), 26);
        assert_ne!(a, b);
    }

    #[test]
    fn session_token_roundtrip() {
        seed_rng([1u8; 32]);
        let key = generate_signing_key().unwrap();
        let now = 1_700_000_000_000;
        let token = sign_session(&claims(now), &key).unwrap();
        let verified = verify_session_token(&token, &key, now + 1_000).unwrap();
        assert_eq!(verified.username, "kumar");
        assert_eq!(verified.role, "admin");
    }

    #[test]
    fn expired_and_tampered_tokens_fail_identically() {
        seed_rng([2u8; 32]);
        let key = generate_signing_key().unwrap();
        let now = 1_700_000_000_000;
        let token = sign_session(&claims(now), &key).unwrap();

        let expired = verify_session_token(&token, &key, now + 86_400_000).unwrap_err();

        let mut tampered = token.clone();
        let flipped = if tampered.pop() == Some('0') { '1' } else { '0' };
        tampered.push(flipped);
        let forged = verify_session_token(&tampered, &key, now + 1_000).unwrap_err();

        assert_eq!(expired, forged);

        let wrong_key = generate_signing_key().unwrap();
        let bad_key = verify_session_token(&token, &wrong_key, now + 1_000).unwrap_err();
        assert_eq!(expired, bad_key);
    }

    #[test]
    fn empty_key_is_refused() {
        let now = 1_700_000_000_000;
        assert!(sign_session(&claims(now), &[]).is_err());
        assert!(verify_session_token("00.00", &[], now).is_err());
    }
}
