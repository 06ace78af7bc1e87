use crate::database::client::Db;
use crate::database::table_names::PROFILE_TABLE_NAME;
use crate::entities::profile::Profile;
use crate::interfaces::repositories::profile::ProfilesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use surrealdb::sql::Thing;

#[derive(Debug, Deserialize)]
struct ProfileRecord {
    id: Thing,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl From<ProfileRecord> for Profile {
    fn from(value: ProfileRecord) -> Self {
        Profile {
            id: value.id.id.to_raw(),
            full_name: value.full_name,
            username: value.username,
            avatar_url: value.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProfileContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
}

/// Read side of the hosted profile records; `upsert` is only used to seed data.
#[derive(Debug)]
pub struct ProfilesRepository {
    client: Arc<Db>,
}

impl ProfilesRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {PROFILE_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS full_name ON TABLE {PROFILE_TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS username ON TABLE {PROFILE_TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS avatar_url ON TABLE {PROFILE_TABLE_NAME} TYPE option<string>;
    ");
        let mutation = self.client.query(sql).await?;
        mutation.check()?;

        Ok(())
    }

    pub async fn upsert(&self, profile: Profile) -> AppResult<Profile> {
        let record = self
            .client
            .query("UPSERT $id CONTENT $data;")
            .bind(("id", Thing::from((PROFILE_TABLE_NAME, profile.id.as_str()))))
            .bind((
                "data",
                ProfileContent {
                    full_name: profile.full_name,
                    username: profile.username,
                    avatar_url: profile.avatar_url,
                },
            ))
            .await?
            .take::<Option<ProfileRecord>>(0)?;

        record.map(Profile::from).ok_or(AppError::Generic {
            description: "Profile was not saved".to_string(),
        })
    }
}

#[async_trait]
impl ProfilesRepositoryInterface for ProfilesRepository {
    async fn get_by_ids(&self, user_ids: &[String]) -> AppResult<Vec<Profile>> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }
        let ids = user_ids
            .iter()
            .map(|id| Thing::from((PROFILE_TABLE_NAME, id.as_str())))
            .collect::<Vec<Thing>>();

        let data = self
            .client
            .query(format!("SELECT * FROM {PROFILE_TABLE_NAME} WHERE id IN $ids;"))
            .bind(("ids", ids))
            .await?
            .take::<Vec<ProfileRecord>>(0)?;

        Ok(data.into_iter().map(Profile::from).collect())
    }
}
