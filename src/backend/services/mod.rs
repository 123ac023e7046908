pub mod auth_service;
pub mod comment_service;
pub mod document_service;
