// src/backend/utils/rng.rs

use crate::error::PortfolioError;
use ic_cdk::api::management_canister::main::raw_rand;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use std::cell::RefCell;

thread_local! {
    // Deterministic generator seeded once from IC entropy. Feeds record id
    // randomness, password salts and the session signing key.
    static INTERNAL_RNG: RefCell<Option<ChaCha8Rng>> = RefCell::new(None);
}

/// Seeds the thread-local generator. Called with `raw_rand` output during
/// canister init/post_upgrade, and directly from tests.
pub fn seed_rng(seed: [u8; 32]) {
    INTERNAL_RNG.with(|rng| {
        *rng.borrow_mut() = Some(ChaCha8Rng::from_seed(seed));
    });
}

/// Borrows the seeded generator.
///
/// # Errors
///
/// Returns `PortfolioError::InternalError` if the generator has not been
/// seeded yet (the init timer has not run).
pub fn with_rng<F, R>(f: F) -> Result<R, PortfolioError>
where
    F: FnOnce(&mut ChaCha8Rng) -> R,
{
    INTERNAL_RNG.with(|rng| {
        let mut borrowed = rng.borrow_mut();
        match borrowed.as_mut() {
            Some(rng_instance) => Ok(f(rng_instance)),
            None => Err(PortfolioError::InternalError(
                "Random number generator accessed before initialization".to_string(),
            )),
        }
    })
}

/// Fetches fresh IC entropy and seeds the generator. Scheduled as a
/// zero-delay timer from init/post_upgrade because `raw_rand` is an async
/// inter-canister call.
pub async fn seed_from_ic_entropy() -> Result<(), PortfolioError> {
    let (bytes,) = raw_rand().await.map_err(|(code, msg)| {
        PortfolioError::InternalError(format!("raw_rand failed: code={}, msg={}", code as u8, msg))
    })?;
    let seed: [u8; 32] = bytes
        .get(..32)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            PortfolioError::InternalError(
                "raw_rand returned insufficient bytes for seed".to_string(),
            )
        })?;
    seed_rng(seed);
    ic_cdk::println!("Internal RNG initialized successfully.");
    Ok(())
}

// getrandom hook for wasm32-unknown-unknown, backed by the same generator.
#[cfg(target_arch = "wasm32")]
mod getrandom_hook {
    use rand_chacha::rand_core::RngCore;

    fn custom_getrandom(buf: &mut [u8]) -> Result<(), getrandom::Error> {
        super::with_rng(|rng| rng.fill_bytes(buf)).map_err(|_| {
            getrandom::Error::from(
                core::num::NonZeroU32::new(getrandom::Error::CUSTOM_START + 1)
                    .expect("nonzero error code"),
            )
        })
    }

    getrandom::register_custom_getrandom!(custom_getrandom);
}
