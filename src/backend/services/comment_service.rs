// src/backend/services/comment_service.rs
// Comments are ordinary engine documents nested under an article via their
// `articleId` field.

use crate::{
    error::PortfolioError,
    models::{
        common::{Collection, RecordId, Timestamp},
        document::{Document, FieldMap, FieldValue},
    },
    services::document_service,
    storage,
};

/// Returns the comments attached to one article.
// Full scan; the comments map is small and carries no secondary index.
pub fn list_for_article(article_id: &RecordId) -> Vec<Document> {
    storage::list_documents(Collection::Comments)
        .into_iter()
        .filter(|comment| {
            matches!(
                comment.fields.get("articleId"),
                Some(FieldValue::Text(id)) if id == article_id
            )
        })
        .collect()
}

/// Attaches a new comment to an article. The parent id always comes from
/// the path parameter, never the payload, and the like counter starts at
/// zero.
pub fn add_to_article(
    article_id: &RecordId,
    author: String,
    content: String,
    now: Timestamp,
) -> Result<Document, PortfolioError> {
    let mut fields = FieldMap::new();
    fields.insert("author".to_string(), FieldValue::Text(author));
    fields.insert("content".to_string(), FieldValue::Text(content));
    fields.insert(
        "articleId".to_string(),
        FieldValue::Text(article_id.clone()),
    );
    fields.insert("likes".to_string(), FieldValue::Int(0));
    document_service::create_record(Collection::Comments, fields, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rng::seed_rng;

    #[test]
    fn comments_are_scoped_to_their_article() {
        seed_rng([21u8; 32]);
        let article_a = "01A".to_string();
        let article_b = "01B".to_string();

        let first = add_to_article(&article_a, "ada".to_string(), "nice".to_string(), 1_000)
            .unwrap();
        let second = add_to_article(&article_a, "bob".to_string(), "agreed".to_string(), 2_000)
            .unwrap();
        add_to_article(&article_b, "eve".to_string(), "other".to_string(), 3_000).unwrap();

        let for_a = list_for_article(&article_a);
        let ids: Vec<&str> = for_a.iter().map(|c| c.id.as_str()).collect();
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
        assert!(for_a
            .iter()
            .all(|c| c.fields.get("articleId") == Some(&FieldValue::Text(article_a.clone()))));
    }

    #[test]
    fn new_comments_start_with_zero_likes() {
        seed_rng([22u8; 32]);
        let comment = add_to_article(
            &"01C".to_string(),
            "ada".to_string(),
            "hello".to_string(),
            1_000,
        )
        .unwrap();
        assert_eq!(comment.fields.get("likes"), Some(&FieldValue::Int(0)));
        assert_eq!(
            comment.fields.get("author"),
            Some(&FieldValue::Text("ada".to_string()))
        );
        assert_eq!(comment.created_at, 1_000);
    }
}
