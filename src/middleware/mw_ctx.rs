use crate::config::AppConfig;
use crate::database::client::Database;
use crate::models::view::comment::CommentView;
use crate::utils::jwt::JWT;
use crate::utils::thread_cache::{ThreadCache, ThreadKey};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AppEventType {
    CommentCreated(CommentView),
    CommentLikeToggled { comment_id: String, likes_count: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEvent {
    pub user_id: String,
    pub thread: ThreadKey,
    pub event: AppEventType,
}

pub struct CtxState {
    pub db: Database,
    pub is_development: bool,
    pub jwt: JWT,
    pub event_sender: broadcast::Sender<AppEvent>,
    pub thread_cache: Arc<ThreadCache>,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CTX STATE HERE :)")
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    let (event_sender, _) = broadcast::channel(config.event_channel_capacity.max(1));
    let ctx_state = CtxState {
        db,
        is_development: config.is_development,
        jwt: JWT::new(config.jwt_secret.clone(), Duration::days(1)),
        event_sender,
        thread_cache: Arc::new(ThreadCache::with_capacity(config.thread_cache_capacity)),
    };
    Arc::new(ctx_state)
}
