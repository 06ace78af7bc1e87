use crate::database::client::Db;
use crate::database::table_names::PROFILE_TABLE_NAME;
use crate::entities::content_kind::ContentKind;
use crate::interfaces::repositories::like::CommentLikesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use surrealdb::err::Error::IndexExists;
use surrealdb::sql::Thing;

#[derive(Debug, Deserialize)]
struct LikeCount {
    out: Thing,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct LikeRecord {
    #[allow(dead_code)]
    id: Thing,
}

#[derive(Debug)]
pub struct CommentLikesRepository {
    client: Arc<Db>,
    kind: ContentKind,
}

impl CommentLikesRepository {
    pub fn new(client: Arc<Db>, kind: ContentKind) -> Self {
        Self { client, kind }
    }

    fn table(&self) -> &'static str {
        self.kind.like_table()
    }

    fn comment_thing(&self, comment_id: &str) -> Thing {
        Thing::from((self.kind.comment_table(), comment_id))
    }

    fn user_thing(user_id: &str) -> Thing {
        Thing::from((PROFILE_TABLE_NAME, user_id))
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let table = self.table();
        let comment_table = self.kind.comment_table();
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {table} TYPE RELATION IN {PROFILE_TABLE_NAME} OUT {comment_table} SCHEMAFULL;
    DEFINE INDEX IF NOT EXISTS {table}_in_out_unique_idx ON {table} FIELDS in, out UNIQUE;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {table} TYPE datetime DEFAULT time::now();
    ");
        let mutation = self.client.query(sql).await?;
        mutation.check()?;

        Ok(())
    }
}

/// Embedded engines report the typed index error; remote ones only carry its text.
/// `like_pair_is_unique_in_storage` pins both against the running engine.
fn is_unique_violation(err: &surrealdb::Error) -> bool {
    matches!(err, surrealdb::Error::Db(IndexExists { .. }))
        || err.to_string().contains("already contains")
}

#[async_trait]
impl CommentLikesRepositoryInterface for CommentLikesRepository {
    async fn count(&self, comment_id: &str) -> AppResult<u32> {
        let count = self
            .client
            .query(format!(
                "RETURN array::len((SELECT id FROM {} WHERE out=$out));",
                self.table()
            ))
            .bind(("out", self.comment_thing(comment_id)))
            .await?
            .take::<Option<i64>>(0)?
            .unwrap_or(0);

        Ok(count as u32)
    }

    async fn has_liked(&self, comment_id: &str, user_id: &str) -> AppResult<bool> {
        let ids = self
            .client
            .query(format!(
                "SELECT VALUE id FROM {} WHERE in=$in AND out=$out LIMIT 1;",
                self.table()
            ))
            .bind(("in", Self::user_thing(user_id)))
            .bind(("out", self.comment_thing(comment_id)))
            .await?
            .take::<Vec<Thing>>(0)?;

        Ok(!ids.is_empty())
    }

    async fn count_many(&self, comment_ids: &[String]) -> AppResult<HashMap<String, u32>> {
        if comment_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let outs = comment_ids
            .iter()
            .map(|id| self.comment_thing(id))
            .collect::<Vec<Thing>>();

        let rows = self
            .client
            .query(format!(
                "SELECT out, count() AS count FROM {} WHERE out IN $outs GROUP BY out;",
                self.table()
            ))
            .bind(("outs", outs))
            .await?
            .take::<Vec<LikeCount>>(0)?;

        Ok(rows
            .into_iter()
            .map(|r| (r.out.id.to_raw(), r.count.max(0) as u32))
            .collect())
    }

    async fn liked_by_user(
        &self,
        comment_ids: &[String],
        user_id: &str,
    ) -> AppResult<HashSet<String>> {
        if comment_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let outs = comment_ids
            .iter()
            .map(|id| self.comment_thing(id))
            .collect::<Vec<Thing>>();

        let liked = self
            .client
            .query(format!(
                "SELECT VALUE out FROM {} WHERE in=$in AND out IN $outs;",
                self.table()
            ))
            .bind(("in", Self::user_thing(user_id)))
            .bind(("outs", outs))
            .await?
            .take::<Vec<Thing>>(0)?;

        Ok(liked.into_iter().map(|t| t.id.to_raw()).collect())
    }

    async fn like(&self, comment_id: &str, user_id: &str) -> AppResult<()> {
        let res = self
            .client
            .query(format!("RELATE $in->{}->$out;", self.table()))
            .bind(("in", Self::user_thing(user_id)))
            .bind(("out", self.comment_thing(comment_id)))
            .await?;

        match res.check() {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(AppError::DuplicateLike),
            Err(err) => Err(err.into()),
        }
    }

    async fn unlike(&self, comment_id: &str, user_id: &str) -> AppResult<bool> {
        let removed = self
            .client
            .query(format!(
                "DELETE {} WHERE in=$in AND out=$out RETURN BEFORE;",
                self.table()
            ))
            .bind(("in", Self::user_thing(user_id)))
            .bind(("out", self.comment_thing(comment_id)))
            .await?
            .take::<Vec<LikeRecord>>(0)?;

        Ok(!removed.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_index_errors_are_recognized() {
        let typed = surrealdb::Error::Db(IndexExists {
            thing: Thing::from(("post_comment_like", "l1")),
            index: "post_comment_like_in_out_unique_idx".to_string(),
            value: "[profile:bob, post_comment:c1]".to_string(),
        });
        assert!(is_unique_violation(&typed));

        let remote = surrealdb::Error::Api(surrealdb::error::Api::Query(typed.to_string()));
        assert!(is_unique_violation(&remote));

        let other = surrealdb::Error::Api(surrealdb::error::Api::Query(
            "There was a problem with the database".to_string(),
        ));
        assert!(!is_unique_violation(&other));
    }
}
