// src/backend/storage/credentials.rs
use crate::error::PortfolioError;
use crate::models::credentials::{AdminCredentials, BootstrapCredentials};
use crate::storage::memory::{
    get_bootstrap_memory, get_credentials_memory, get_signing_key_memory, Memory,
};
use crate::storage::storable::Cbor;
use ic_stable_structures::StableCell;
use std::cell::RefCell;

thread_local! {
    /// The singleton admin credential pair. `None` until a real pair has
    /// been provisioned; rotation overwrites the whole cell in one write.
    static CREDENTIALS: RefCell<StableCell<Cbor<Option<AdminCredentials>>, Memory>> = RefCell::new(
        StableCell::init(get_credentials_memory(), Cbor(None))
            .expect("Failed to initialize credentials stable cell")
    );

    /// HMAC key for session tokens. Empty until seeded from IC entropy.
    static SIGNING_KEY: RefCell<StableCell<Cbor<Vec<u8>>, Memory>> = RefCell::new(
        StableCell::init(get_signing_key_memory(), Cbor(Vec::new()))
            .expect("Failed to initialize signing key stable cell")
    );

    /// Bootstrap pair from init args. Dead as soon as CREDENTIALS is set.
    static BOOTSTRAP: RefCell<StableCell<Cbor<Option<BootstrapCredentials>>, Memory>> = RefCell::new(
        StableCell::init(get_bootstrap_memory(), Cbor(None))
            .expect("Failed to initialize bootstrap stable cell")
    );
}

/// Get the currently provisioned credential pair, if any.
pub fn get_credentials() -> Option<AdminCredentials> {
    CREDENTIALS.with(|cell| cell.borrow().get().0.clone())
}

/// Overwrite the credential pair. Single atomic cell write; no merge, no
/// history.
pub fn set_credentials(credentials: AdminCredentials) -> Result<(), PortfolioError> {
    CREDENTIALS.with(|cell| {
        cell.borrow_mut()
            .set(Cbor(Some(credentials)))
            .map(|_prev| ())
            .map_err(|e| PortfolioError::StorageError(format!("Failed to store credentials: {e:?}")))
    })
}

pub fn get_signing_key() -> Vec<u8> {
    SIGNING_KEY.with(|cell| cell.borrow().get().0.clone())
}

pub fn set_signing_key(key: Vec<u8>) -> Result<(), PortfolioError> {
    SIGNING_KEY.with(|cell| {
        cell.borrow_mut()
            .set(Cbor(key))
            .map(|_prev| ())
            .map_err(|e| PortfolioError::StorageError(format!("Failed to store signing key: {e:?}")))
    })
}

/// Clears the credential pair so a test can exercise the bootstrap path.
#[cfg(test)]
pub fn reset_credentials_for_tests() {
    CREDENTIALS.with(|cell| {
        cell.borrow_mut()
            .set(Cbor(None))
            .expect("Failed to reset credentials cell");
    });
}

pub fn get_bootstrap_credentials() -> Option<BootstrapCredentials> {
    BOOTSTRAP.with(|cell| cell.borrow().get().0.clone())
}

pub fn set_bootstrap_credentials(pair: Option<BootstrapCredentials>) -> Result<(), PortfolioError> {
    BOOTSTRAP.with(|cell| {
        cell.borrow_mut()
            .set(Cbor(pair))
            .map(|_prev| ())
            .map_err(|e| PortfolioError::StorageError(format!("Failed to store bootstrap pair: {e:?}")))
    })
}
