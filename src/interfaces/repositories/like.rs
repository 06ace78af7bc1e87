use std::collections::{HashMap, HashSet};

use crate::middleware::error::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait CommentLikesRepositoryInterface: Send + Sync {
    async fn count(&self, comment_id: &str) -> AppResult<u32>;
    async fn has_liked(&self, comment_id: &str, user_id: &str) -> AppResult<bool>;
    /// Comment ids without likes may be missing from the result.
    async fn count_many(&self, comment_ids: &[String]) -> AppResult<HashMap<String, u32>>;
    async fn liked_by_user(&self, comment_ids: &[String], user_id: &str)
        -> AppResult<HashSet<String>>;
    /// Fails with `AppError::DuplicateLike` when the pair already exists.
    async fn like(&self, comment_id: &str, user_id: &str) -> AppResult<()>;
    async fn unlike(&self, comment_id: &str, user_id: &str) -> AppResult<bool>;
}
