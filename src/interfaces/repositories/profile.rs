use crate::{entities::profile::Profile, middleware::error::AppResult};
use async_trait::async_trait;

#[async_trait]
pub trait ProfilesRepositoryInterface: Send + Sync {
    async fn get_by_ids(&self, user_ids: &[String]) -> AppResult<Vec<Profile>>;
}
