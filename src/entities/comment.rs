use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_kind::ContentKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub kind: ContentKind,
    pub belongs_to: String,
    pub created_by: String,
    pub content: String,
    pub parent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub belongs_to: String,
    pub created_by: String,
    pub content: String,
    pub parent: Option<String>,
}
