// src/backend/storage/documents.rs
use crate::models::common::{Collection, RecordId};
use crate::models::document::Document;
use crate::storage::memory::{
    get_articles_memory, get_books_memory, get_comments_memory, get_experiences_memory,
    get_locations_memory, get_projects_memory, get_skills_memory, Memory,
};
use crate::storage::storable::{Cbor, StorableString};
use ic_stable_structures::StableBTreeMap;
use std::cell::RefCell;

type StorableDocument = Cbor<Document>;
type DocumentMap = StableBTreeMap<StorableString, StorableDocument, Memory>;

thread_local! {
    // One map per collection, mirroring the one-table-per-entity layout of
    // the admin frontend. Key = record id (ULID text), Value = Document.
    static ARTICLES: RefCell<DocumentMap> = RefCell::new(
        StableBTreeMap::init(get_articles_memory())
    );

    static BOOKS: RefCell<DocumentMap> = RefCell::new(
        StableBTreeMap::init(get_books_memory())
    );

    static LOCATIONS: RefCell<DocumentMap> = RefCell::new(
        StableBTreeMap::init(get_locations_memory())
    );

    static PROJECTS: RefCell<DocumentMap> = RefCell::new(
        StableBTreeMap::init(get_projects_memory())
    );

    static SKILLS: RefCell<DocumentMap> = RefCell::new(
        StableBTreeMap::init(get_skills_memory())
    );

    static EXPERIENCES: RefCell<DocumentMap> = RefCell::new(
        StableBTreeMap::init(get_experiences_memory())
    );

    static COMMENTS: RefCell<DocumentMap> = RefCell::new(
        StableBTreeMap::init(get_comments_memory())
    );
}

fn with_map<R>(collection: Collection, f: impl FnOnce(&mut DocumentMap) -> R) -> R {
    match collection {
        Collection::Articles => ARTICLES.with(|m| f(&mut m.borrow_mut())),
        Collection::Books => BOOKS.with(|m| f(&mut m.borrow_mut())),
        Collection::Locations => LOCATIONS.with(|m| f(&mut m.borrow_mut())),
        Collection::Projects => PROJECTS.with(|m| f(&mut m.borrow_mut())),
        Collection::Skills => SKILLS.with(|m| f(&mut m.borrow_mut())),
        Collection::Experiences => EXPERIENCES.with(|m| f(&mut m.borrow_mut())),
        Collection::Comments => COMMENTS.with(|m| f(&mut m.borrow_mut())),
    }
}

/// Inserts or overwrites a document. The whole record is written in one
/// insert, so a concurrent reader never observes a torn field value.
pub fn insert_document(collection: Collection, document: &Document) -> Option<Document> {
    let key = Cbor(document.id.clone());
    with_map(collection, |map| {
        map.insert(key, Cbor(document.clone())).map(|prev| prev.0)
    })
}

/// Retrieves a document by its record id.
pub fn get_document(collection: Collection, id: &RecordId) -> Option<Document> {
    let key = Cbor(id.clone());
    with_map(collection, |map| map.get(&key).map(|doc| doc.0))
}

/// Removes a document. Returns the removed record, or None if the id was
/// already absent.
pub fn remove_document(collection: Collection, id: &RecordId) -> Option<Document> {
    let key = Cbor(id.clone());
    with_map(collection, |map| map.remove(&key).map(|doc| doc.0))
}

/// Returns all documents of a collection in storage order. No pagination;
/// every collection on a personal site stays small.
pub fn list_documents(collection: Collection) -> Vec<Document> {
    with_map(collection, |map| {
        map.iter().map(|(_key, value)| value.0).collect()
    })
}

pub fn document_count(collection: Collection) -> u64 {
    with_map(collection, |map| map.len())
}
