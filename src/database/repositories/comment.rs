use crate::database::client::Db;
use crate::database::table_names::PROFILE_TABLE_NAME;
use crate::entities::comment::{Comment, CreateComment};
use crate::entities::content_kind::ContentKind;
use crate::interfaces::repositories::comment::CommentsRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use surrealdb::sql::Thing;

#[derive(Debug, Deserialize)]
struct CommentRecord {
    id: Thing,
    belongs_to: String,
    created_by: Thing,
    content: String,
    #[serde(default)]
    parent: Option<Thing>,
    created_at: DateTime<Utc>,
}

impl CommentRecord {
    fn into_comment(self, kind: ContentKind) -> Comment {
        Comment {
            id: self.id.id.to_raw(),
            kind,
            belongs_to: self.belongs_to,
            created_by: self.created_by.id.to_raw(),
            content: self.content,
            parent: self.parent.map(|p| p.id.to_raw()),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug)]
pub struct CommentsRepository {
    client: Arc<Db>,
    kind: ContentKind,
}

impl CommentsRepository {
    pub fn new(client: Arc<Db>, kind: ContentKind) -> Self {
        Self { client, kind }
    }

    fn table(&self) -> &'static str {
        self.kind.comment_table()
    }

    fn thing(&self, comment_id: &str) -> Thing {
        Thing::from((self.table(), comment_id))
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let table = self.table();
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {table} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS belongs_to ON TABLE {table} TYPE string;
    DEFINE INDEX IF NOT EXISTS {table}_belongs_to_idx ON TABLE {table} COLUMNS belongs_to;
    DEFINE FIELD IF NOT EXISTS created_by ON TABLE {table} TYPE record<{PROFILE_TABLE_NAME}>;
    DEFINE FIELD IF NOT EXISTS content ON TABLE {table} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE FIELD IF NOT EXISTS parent ON TABLE {table} TYPE option<record<{table}>>;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {table} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    ");
        let mutation = self.client.query(sql).await?;
        mutation.check()?;

        Ok(())
    }
}

#[async_trait]
impl CommentsRepositoryInterface for CommentsRepository {
    fn kind(&self) -> ContentKind {
        self.kind
    }

    async fn list_by_content(&self, content_id: &str) -> AppResult<Vec<Comment>> {
        let data = self
            .client
            .query(format!(
                "SELECT * FROM {} WHERE belongs_to=$content ORDER BY created_at ASC;",
                self.table()
            ))
            .bind(("content", content_id.to_string()))
            .await?
            .take::<Vec<CommentRecord>>(0)?;

        Ok(data
            .into_iter()
            .map(|r| r.into_comment(self.kind))
            .collect())
    }

    async fn get_by_id(&self, comment_id: &str) -> AppResult<Option<Comment>> {
        let record = self
            .client
            .query("SELECT * FROM $id;")
            .bind(("id", self.thing(comment_id)))
            .await?
            .take::<Option<CommentRecord>>(0)?;

        Ok(record.map(|r| r.into_comment(self.kind)))
    }

    async fn create(&self, data: CreateComment) -> AppResult<Comment> {
        let parent_field = if data.parent.is_some() {
            ", parent=$parent"
        } else {
            ""
        };
        let mut query = self
            .client
            .query(format!(
                "CREATE {} SET belongs_to=$belongs_to, created_by=$user, content=$content{parent_field};",
                self.table()
            ))
            .bind(("belongs_to", data.belongs_to))
            .bind(("user", Thing::from((PROFILE_TABLE_NAME, data.created_by.as_str()))))
            .bind(("content", data.content));
        if let Some(parent) = data.parent {
            query = query.bind(("parent", self.thing(&parent)));
        }

        let record = query.await?.take::<Option<CommentRecord>>(0)?;

        record
            .map(|r| r.into_comment(self.kind))
            .ok_or(AppError::Generic {
                description: "Comment was not created".to_string(),
            })
    }
}
