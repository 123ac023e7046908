// src/backend/storage/memory.rs
use ic_stable_structures::memory_manager::{MemoryId, MemoryManager, VirtualMemory};
use ic_stable_structures::DefaultMemoryImpl;
use std::cell::RefCell;

// Define Memory IDs for stable structures
// Choose non-overlapping IDs
const ARTICLES_MEM_ID: MemoryId = MemoryId::new(1);
const BOOKS_MEM_ID: MemoryId = MemoryId::new(2);
const LOCATIONS_MEM_ID: MemoryId = MemoryId::new(3);
const PROJECTS_MEM_ID: MemoryId = MemoryId::new(4);
const SKILLS_MEM_ID: MemoryId = MemoryId::new(5);
const EXPERIENCES_MEM_ID: MemoryId = MemoryId::new(6);
const COMMENTS_MEM_ID: MemoryId = MemoryId::new(7);
const METRICS_MEM_ID: MemoryId = MemoryId::new(8);
// Reserve IDs 9-24 for future collections
const CREDENTIALS_MEM_ID: MemoryId = MemoryId::new(25);
const SIGNING_KEY_MEM_ID: MemoryId = MemoryId::new(26);
const BOOTSTRAP_MEM_ID: MemoryId = MemoryId::new(27);

// Define memory type alias
pub type Memory = VirtualMemory<DefaultMemoryImpl>;

thread_local! {
    // Memory manager
    static MEMORY_MANAGER: RefCell<MemoryManager<DefaultMemoryImpl>> = RefCell::new(
        MemoryManager::init(DefaultMemoryImpl::default())
    );
}

/// Get memory instance for a specific MemoryId.
pub fn get_memory(id: MemoryId) -> Memory {
    MEMORY_MANAGER.with(|m| m.borrow().get(id))
}

// Functions to get specific memory instances
pub fn get_articles_memory() -> Memory {
    get_memory(ARTICLES_MEM_ID)
}

pub fn get_books_memory() -> Memory {
    get_memory(BOOKS_MEM_ID)
}

pub fn get_locations_memory() -> Memory {
    get_memory(LOCATIONS_MEM_ID)
}

pub fn get_projects_memory() -> Memory {
    get_memory(PROJECTS_MEM_ID)
}

pub fn get_skills_memory() -> Memory {
    get_memory(SKILLS_MEM_ID)
}

pub fn get_experiences_memory() -> Memory {
    get_memory(EXPERIENCES_MEM_ID)
}

pub fn get_comments_memory() -> Memory {
    get_memory(COMMENTS_MEM_ID)
}

pub fn get_metrics_memory() -> Memory {
    get_memory(METRICS_MEM_ID)
}

pub fn get_credentials_memory() -> Memory {
    get_memory(CREDENTIALS_MEM_ID)
}

pub fn get_signing_key_memory() -> Memory {
    get_memory(SIGNING_KEY_MEM_ID)
}

pub fn get_bootstrap_memory() -> Memory {
    get_memory(BOOTSTRAP_MEM_ID)
}
