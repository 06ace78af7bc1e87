use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::database::repositories::{
    comment::CommentsRepository, like::CommentLikesRepository, profile::ProfilesRepository,
};
use crate::entities::content_kind::ContentKind;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::models::view::comment::CommentView;
use crate::models::view::like::LikeStatus;
use crate::services::comment_service::{CommentInput, CommentService};

pub const EMPTY_THREAD_MESSAGE: &str = "No comments yet. Be the first to comment!";

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route(
            "/api/:kind/:content_id/comments",
            get(get_thread).post(create_comment),
        )
        .route(
            "/api/:kind/:content_id/comments/:comment_id/replies",
            post(create_reply),
        )
        .route("/api/comments/:kind/:comment_id/like", post(toggle_like))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub comments: Vec<CommentView>,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentCreatedResponse {
    pub comment: CommentView,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeToggleResponse {
    pub status: LikeStatus,
    pub likes_count: u32,
    pub message: String,
}

fn comment_service<'a>(
    state: &'a CtxState,
    ctx: &'a Ctx,
    kind: ContentKind,
) -> CommentService<'a, CommentsRepository, CommentLikesRepository, ProfilesRepository> {
    CommentService::new(
        ctx,
        &state.thread_cache,
        &state.event_sender,
        state.db.comments(kind),
        state.db.comment_likes(kind),
        &state.db.profiles,
    )
}

async fn get_thread(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path((kind, content_id)): Path<(ContentKind, String)>,
) -> CtxResult<Json<ThreadResponse>> {
    let comments = comment_service(&state, &ctx, kind)
        .get_thread(&content_id)
        .await?;

    let total = comments.iter().map(|c| 1 + c.replies.len()).sum();
    let message = comments
        .is_empty()
        .then(|| EMPTY_THREAD_MESSAGE.to_string());

    Ok(Json(ThreadResponse {
        comments,
        total,
        message,
    }))
}

async fn create_comment(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path((kind, content_id)): Path<(ContentKind, String)>,
    Json(body): Json<CommentInput>,
) -> CtxResult<Json<CommentCreatedResponse>> {
    let comment = comment_service(&state, &ctx, kind)
        .create_comment(&content_id, body)
        .await?;

    Ok(Json(CommentCreatedResponse {
        comment,
        message: "Comment posted".to_string(),
    }))
}

async fn create_reply(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path((kind, content_id, comment_id)): Path<(ContentKind, String, String)>,
    Json(body): Json<CommentInput>,
) -> CtxResult<Json<CommentCreatedResponse>> {
    let comment = comment_service(&state, &ctx, kind)
        .create_reply(&content_id, &comment_id, body)
        .await?;

    Ok(Json(CommentCreatedResponse {
        comment,
        message: "Reply posted".to_string(),
    }))
}

async fn toggle_like(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path((kind, comment_id)): Path<(ContentKind, String)>,
) -> CtxResult<Json<LikeToggleResponse>> {
    let toggle = comment_service(&state, &ctx, kind)
        .toggle_like(&comment_id)
        .await?;

    let message = match toggle.status {
        LikeStatus::Added => "Comment liked",
        LikeStatus::Removed => "Like removed",
    };

    Ok(Json(LikeToggleResponse {
        status: toggle.status,
        likes_count: toggle.likes_count,
        message: message.to_string(),
    }))
}
