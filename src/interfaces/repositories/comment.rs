use crate::{
    entities::{
        comment::{Comment, CreateComment},
        content_kind::ContentKind,
    },
    middleware::error::AppResult,
};
use async_trait::async_trait;

#[async_trait]
pub trait CommentsRepositoryInterface: Send + Sync {
    fn kind(&self) -> ContentKind;
    /// Ordered by creation time ascending.
    async fn list_by_content(&self, content_id: &str) -> AppResult<Vec<Comment>>;
    async fn get_by_id(&self, comment_id: &str) -> AppResult<Option<Comment>>;
    async fn create(&self, data: CreateComment) -> AppResult<Comment>;
}
