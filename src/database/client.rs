use std::sync::Arc;

use strum::IntoEnumIterator;
use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repositories::{
    comment::CommentsRepository, like::CommentLikesRepository, profile::ProfilesRepository,
};
use crate::entities::content_kind::ContentKind;
use crate::middleware::error::AppResult;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

#[derive(Debug)]
pub struct Database {
    pub client: Arc<Db>,
    pub post_comments: CommentsRepository,
    pub article_comments: CommentsRepository,
    pub startup_comments: CommentsRepository,
    pub post_comment_likes: CommentLikesRepository,
    pub article_comment_likes: CommentLikesRepository,
    pub startup_comment_likes: CommentLikesRepository,
    pub profiles: ProfilesRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> AppResult<Self> {
        info!("->> connecting DB url={} ns={} db={}", config.url, config.namespace, config.database);
        let conn = connect(config.url).await?;

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password }).await?;
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await?;

        let version = conn.version().await?;
        info!("->> connected DB version: {version}");

        Ok(Self::from_client(conn))
    }

    pub fn from_client(conn: Db) -> Self {
        let client = Arc::new(conn);
        Self {
            post_comments: CommentsRepository::new(client.clone(), ContentKind::Post),
            article_comments: CommentsRepository::new(client.clone(), ContentKind::Article),
            startup_comments: CommentsRepository::new(client.clone(), ContentKind::Startup),
            post_comment_likes: CommentLikesRepository::new(client.clone(), ContentKind::Post),
            article_comment_likes: CommentLikesRepository::new(
                client.clone(),
                ContentKind::Article,
            ),
            startup_comment_likes: CommentLikesRepository::new(
                client.clone(),
                ContentKind::Startup,
            ),
            profiles: ProfilesRepository::new(client.clone()),
            client,
        }
    }

    pub fn comments(&self, kind: ContentKind) -> &CommentsRepository {
        match kind {
            ContentKind::Post => &self.post_comments,
            ContentKind::Article => &self.article_comments,
            ContentKind::Startup => &self.startup_comments,
        }
    }

    pub fn comment_likes(&self, kind: ContentKind) -> &CommentLikesRepository {
        match kind {
            ContentKind::Post => &self.post_comment_likes,
            ContentKind::Article => &self.article_comment_likes,
            ContentKind::Startup => &self.startup_comment_likes,
        }
    }

    pub async fn run_migrations(&self) -> AppResult<()> {
        self.profiles.mutate_db().await?;
        for kind in ContentKind::iter() {
            // likes relate into the comment table, so comments go first
            self.comments(kind).mutate_db().await?;
            self.comment_likes(kind).mutate_db().await?;
        }
        Ok(())
    }
}
