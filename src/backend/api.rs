// src/backend/api.rs
// Candid API endpoint definitions (query/update functions)

use crate::{
    error::PortfolioError,
    metrics::{collection_counts, CollectionCount, PortfolioMetrics},
    models::{
        common::{Collection, RecordId},
        credentials::SessionClaims,
        document::{sorted_by_order, Document, FieldMap},
    },
    services::{auth_service, comment_service, document_service},
    storage,
    utils::guards::require_admin_session,
    utils::time::now_ms,
};
use candid::CandidType;
use ic_cdk_macros::{query, update};
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Validation Helper ---

fn validate_request<T: Validate>(req: &T) -> Result<(), PortfolioError> {
    req.validate()
        .map_err(|e| PortfolioError::InvalidInput(e.to_string()))
}

// --- Request/Response Structs ---

#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 200))]
    pub password: String,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct UserInfo {
    pub username: String,
    pub role: String,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

// New-password length is checked by the credential gate itself so that a
// wrong current password still answers Unauthorized, as the admin frontend
// expects.
#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct ChangeCredentialsRequest {
    #[validate(length(min = 1, max = 100))]
    pub current_username: String,
    #[validate(length(min = 1, max = 200))]
    pub current_password: String,
    #[validate(length(max = 100))]
    pub new_username: Option<String>,
    pub new_password: String,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct BasicResponse {
    pub success: bool,
    pub message: String,
}

#[derive(CandidType, Deserialize, Clone, Debug, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

// --- Entity Endpoint Helpers ---

fn list(collection: Collection) -> Result<Vec<Document>, PortfolioError> {
    Ok(document_service::list_records(collection))
}

/// Listing variant for collections the frontend renders in a fixed order.
/// The sort is a pure convenience over the result; storage order itself is
/// unspecified.
fn list_ordered(collection: Collection) -> Result<Vec<Document>, PortfolioError> {
    Ok(sorted_by_order(document_service::list_records(collection)))
}

fn get_one(collection: Collection, id: &RecordId) -> Result<Document, PortfolioError> {
    document_service::get_record(collection, id).ok_or_else(|| {
        PortfolioError::NotFound(format!("{} {} does not exist", collection.singular(), id))
    })
}

fn create(
    collection: Collection,
    token: &str,
    fields: FieldMap,
) -> Result<Document, PortfolioError> {
    let now = now_ms();
    require_admin_session(token, now)?;
    document_service::create_record(collection, fields, now)
}

fn update_fields(
    collection: Collection,
    token: &str,
    id: &RecordId,
    fields: FieldMap,
) -> Result<String, PortfolioError> {
    let now = now_ms();
    require_admin_session(token, now)?;
    document_service::update_record(collection, id, fields, now)?;
    Ok(format!("{} updated successfully", collection.singular()))
}

fn delete(collection: Collection, token: &str, id: &RecordId) -> Result<String, PortfolioError> {
    let now = now_ms();
    require_admin_session(token, now)?;
    document_service::delete_record(collection, id, now);
    Ok(format!("{} deleted successfully", collection.singular()))
}

// --- Article Endpoints ---

#[query]
fn list_articles() -> Result<Vec<Document>, PortfolioError> {
    list(Collection::Articles)
}

#[query]
fn get_article(id: RecordId) -> Result<Document, PortfolioError> {
    get_one(Collection::Articles, &id)
}

#[update]
fn create_article(token: String, fields: FieldMap) -> Result<Document, PortfolioError> {
    create(Collection::Articles, &token, fields)
}

#[update]
fn update_article(token: String, id: RecordId, fields: FieldMap) -> Result<String, PortfolioError> {
    update_fields(Collection::Articles, &token, &id, fields)
}

#[update]
fn delete_article(token: String, id: RecordId) -> Result<String, PortfolioError> {
    delete(Collection::Articles, &token, &id)
}

// --- Book Endpoints ---

#[query]
fn list_books() -> Result<Vec<Document>, PortfolioError> {
    list(Collection::Books)
}

#[query]
fn get_book(id: RecordId) -> Result<Document, PortfolioError> {
    get_one(Collection::Books, &id)
}

#[update]
fn create_book(token: String, fields: FieldMap) -> Result<Document, PortfolioError> {
    create(Collection::Books, &token, fields)
}

#[update]
fn update_book(token: String, id: RecordId, fields: FieldMap) -> Result<String, PortfolioError> {
    update_fields(Collection::Books, &token, &id, fields)
}

#[update]
fn delete_book(token: String, id: RecordId) -> Result<String, PortfolioError> {
    delete(Collection::Books, &token, &id)
}

// --- Location Endpoints ---

#[query]
fn list_locations() -> Result<Vec<Document>, PortfolioError> {
    list(Collection::Locations)
}

#[query]
fn get_location(id: RecordId) -> Result<Document, PortfolioError> {
    get_one(Collection::Locations, &id)
}

#[update]
fn create_location(token: String, fields: FieldMap) -> Result<Document, PortfolioError> {
    create(Collection::Locations, &token, fields)
}

#[update]
fn update_location(
    token: String,
    id: RecordId,
    fields: FieldMap,
) -> Result<String, PortfolioError> {
    update_fields(Collection::Locations, &token, &id, fields)
}

#[update]
fn delete_location(token: String, id: RecordId) -> Result<String, PortfolioError> {
    delete(Collection::Locations, &token, &id)
}

// --- Project Endpoints ---

#[query]
fn list_projects() -> Result<Vec<Document>, PortfolioError> {
    list_ordered(Collection::Projects)
}

#[query]
fn get_project(id: RecordId) -> Result<Document, PortfolioError> {
    get_one(Collection::Projects, &id)
}

#[update]
fn create_project(token: String, fields: FieldMap) -> Result<Document, PortfolioError> {
    create(Collection::Projects, &token, fields)
}

#[update]
fn update_project(token: String, id: RecordId, fields: FieldMap) -> Result<String, PortfolioError> {
    update_fields(Collection::Projects, &token, &id, fields)
}

#[update]
fn delete_project(token: String, id: RecordId) -> Result<String, PortfolioError> {
    delete(Collection::Projects, &token, &id)
}

// --- Skill Endpoints ---

#[query]
fn list_skills() -> Result<Vec<Document>, PortfolioError> {
    list_ordered(Collection::Skills)
}

#[query]
fn get_skill(id: RecordId) -> Result<Document, PortfolioError> {
    get_one(Collection::Skills, &id)
}

#[update]
fn create_skill(token: String, fields: FieldMap) -> Result<Document, PortfolioError> {
    create(Collection::Skills, &token, fields)
}

#[update]
fn update_skill(token: String, id: RecordId, fields: FieldMap) -> Result<String, PortfolioError> {
    update_fields(Collection::Skills, &token, &id, fields)
}

#[update]
fn delete_skill(token: String, id: RecordId) -> Result<String, PortfolioError> {
    delete(Collection::Skills, &token, &id)
}

// --- Experience Endpoints ---

#[query]
fn list_experiences() -> Result<Vec<Document>, PortfolioError> {
    list_ordered(Collection::Experiences)
}

#[query]
fn get_experience(id: RecordId) -> Result<Document, PortfolioError> {
    get_one(Collection::Experiences, &id)
}

#[update]
fn create_experience(token: String, fields: FieldMap) -> Result<Document, PortfolioError> {
    create(Collection::Experiences, &token, fields)
}

#[update]
fn update_experience(
    token: String,
    id: RecordId,
    fields: FieldMap,
) -> Result<String, PortfolioError> {
    update_fields(Collection::Experiences, &token, &id, fields)
}

#[update]
fn delete_experience(token: String, id: RecordId) -> Result<String, PortfolioError> {
    delete(Collection::Experiences, &token, &id)
}

// --- Comment Endpoints (public, nested under an article) ---

#[query]
fn get_article_comments(article_id: RecordId) -> Result<Vec<Document>, PortfolioError> {
    Ok(comment_service::list_for_article(&article_id))
}

#[update]
fn add_article_comment(
    article_id: RecordId,
    req: CreateCommentRequest,
) -> Result<Document, PortfolioError> {
    validate_request(&req)?;
    comment_service::add_to_article(&article_id, req.author, req.content, now_ms())
}

// --- Admin Endpoints ---

#[update]
fn admin_login(req: LoginRequest) -> Result<LoginResponse, PortfolioError> {
    validate_request(&req)?;
    match auth_service::login(&req.username, &req.password, now_ms())? {
        Some((token, claims)) => Ok(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            token: Some(token),
            user: Some(UserInfo {
                username: claims.username,
                role: claims.role,
            }),
        }),
        None => Ok(LoginResponse {
            success: false,
            message: "Invalid credentials".to_string(),
            token: None,
            user: None,
        }),
    }
}

#[update]
fn admin_change_credentials(
    req: ChangeCredentialsRequest,
) -> Result<BasicResponse, PortfolioError> {
    validate_request(&req)?;
    match auth_service::rotate_credentials(
        &req.current_username,
        &req.current_password,
        req.new_username,
        &req.new_password,
        now_ms(),
    ) {
        Ok(()) => Ok(BasicResponse {
            success: true,
            message: "Credentials updated successfully".to_string(),
        }),
        // Bad current pair and short password come back as envelopes, like
        // the admin frontend's 401/400 handling expects.
        Err(PortfolioError::NotAuthorized(message))
        | Err(PortfolioError::InvalidInput(message)) => Ok(BasicResponse {
            success: false,
            message,
        }),
        Err(other) => Err(other),
    }
}

#[query]
fn admin_verify_session(token: String) -> Result<SessionClaims, PortfolioError> {
    require_admin_session(&token, now_ms())
}

// --- Metrics Endpoints ---

#[query]
fn get_metrics(token: String) -> Result<PortfolioMetrics, PortfolioError> {
    require_admin_session(&token, now_ms())?;
    Ok(storage::get_metrics())
}

#[query]
fn get_collection_counts(token: String) -> Result<Vec<CollectionCount>, PortfolioError> {
    require_admin_session(&token, now_ms())?;
    Ok(collection_counts())
}
