use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{author::AuthorView, like::LikeSummary};
use crate::entities::comment::Comment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: String,
    pub belongs_to: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub author: AuthorView,
    pub created_at: DateTime<Utc>,
    pub likes_count: u32,
    pub liked_by_viewer: bool,
    pub replies: Vec<CommentView>,
}

impl CommentView {
    pub fn new(comment: Comment, author: AuthorView, likes: LikeSummary) -> Self {
        CommentView {
            id: comment.id,
            belongs_to: comment.belongs_to,
            parent_id: comment.parent,
            content: comment.content,
            author,
            created_at: comment.created_at,
            likes_count: likes.count,
            liked_by_viewer: likes.viewer_has_liked,
            replies: vec![],
        }
    }
}
