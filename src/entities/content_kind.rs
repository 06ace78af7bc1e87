use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Kind of content item that owns a comment thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ContentKind {
    #[serde(rename = "posts")]
    #[strum(serialize = "post")]
    Post,
    #[serde(rename = "articles")]
    #[strum(serialize = "article")]
    Article,
    #[serde(rename = "startups")]
    #[strum(serialize = "startup")]
    Startup,
}

impl ContentKind {
    pub fn comment_table(&self) -> &'static str {
        match self {
            ContentKind::Post => "post_comment",
            ContentKind::Article => "article_comment",
            ContentKind::Startup => "startup_comment",
        }
    }

    pub fn like_table(&self) -> &'static str {
        match self {
            ContentKind::Post => "post_comment_like",
            ContentKind::Article => "article_comment_like",
            ContentKind::Startup => "startup_comment_like",
        }
    }
}
