// src/backend/models/common.rs
use candid::CandidType;
use serde::{Deserialize, Serialize};

/// Opaque record identifier. ULID text form, assigned once at creation and
/// never rewritten by an update.
pub type RecordId = String;

pub type Timestamp = u64; // Epoch milliseconds
pub type TimestampNs = u64; // Nanoseconds since epoch

/// The seven document collections served by this canister. Six entity
/// collections edited from the admin console, plus article comments.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Copy)]
pub enum Collection {
    Articles,
    Books,
    Locations,
    Projects,
    Skills,
    Experiences,
    Comments,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Articles,
        Collection::Books,
        Collection::Locations,
        Collection::Projects,
        Collection::Skills,
        Collection::Experiences,
        Collection::Comments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Articles => "articles",
            Collection::Books => "books",
            Collection::Locations => "locations",
            Collection::Projects => "projects",
            Collection::Skills => "skills",
            Collection::Experiences => "experiences",
            Collection::Comments => "comments",
        }
    }

    /// Singular label used in confirmation messages ("Book updated successfully").
    pub fn singular(&self) -> &'static str {
        match self {
            Collection::Articles => "Article",
            Collection::Books => "Book",
            Collection::Locations => "Location",
            Collection::Projects => "Project",
            Collection::Skills => "Skill",
            Collection::Experiences => "Experience",
            Collection::Comments => "Comment",
        }
    }
}
