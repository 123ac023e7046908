// src/backend/storage/storable.rs
use ic_stable_structures::{storable::Bound, Storable};
use serde::{de::DeserializeOwned, Serialize};
use std::borrow::Cow;

/// Helper struct to wrap any type T that implements Serialize and DeserializeOwned
/// to make it Storable using CBOR encoding.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Debug)]
pub struct Cbor<T>(pub T)
where
    T: Serialize + DeserializeOwned;

impl<T> Storable for Cbor<T>
where
    T: Serialize + DeserializeOwned,
{
    fn to_bytes(&self) -> Cow<[u8]> {
        let mut writer = vec![];
        ciborium::ser::into_writer(&self.0, &mut writer)
            .expect("Failed to serialize value to CBOR for stable storage");
        Cow::Owned(writer)
    }

    fn from_bytes(bytes: Cow<[u8]>) -> Self {
        let value: T = ciborium::de::from_reader(bytes.as_ref())
            .expect("Failed to deserialize value from CBOR from stable storage");
        Cbor(value)
    }

    // Unbounded storage; record sizes on a personal site never get near the
    // page limits that would make per-type bounds worthwhile.
    const BOUND: Bound = Bound::Unbounded;
}

// Storable key type for the document maps.
pub type StorableString = Cbor<String>;
