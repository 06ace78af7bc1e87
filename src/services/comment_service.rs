use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::Sender;
use validator::Validate;

use crate::{
    entities::comment::{Comment, CreateComment},
    interfaces::repositories::{
        comment::CommentsRepositoryInterface, like::CommentLikesRepositoryInterface,
        profile::ProfilesRepositoryInterface,
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxError, CtxResult},
        mw_ctx::{AppEvent, AppEventType},
    },
    models::view::{
        author::AuthorView,
        comment::CommentView,
        like::{LikeSummary, LikeToggle},
    },
    services::{
        comment_tree::build_comment_tree, like_service::LikeService,
        profile_service::ProfileService,
    },
    utils::thread_cache::{ThreadCache, ThreadKey},
};

pub const MAX_COMMENT_CHARS: usize = 5000;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CommentInput {
    #[validate(length(max = 5000, message = "Max 5000 characters"))]
    pub content: String,
}

pub struct CommentService<'a, C, L, P>
where
    C: CommentsRepositoryInterface,
    L: CommentLikesRepositoryInterface,
    P: ProfilesRepositoryInterface,
{
    ctx: &'a Ctx,
    comments_repository: &'a C,
    like_service: LikeService<'a, L>,
    profile_service: ProfileService<'a, P>,
    cache: &'a ThreadCache,
    event_sender: &'a Sender<AppEvent>,
}

impl<'a, C, L, P> CommentService<'a, C, L, P>
where
    C: CommentsRepositoryInterface,
    L: CommentLikesRepositoryInterface,
    P: ProfilesRepositoryInterface,
{
    pub fn new(
        ctx: &'a Ctx,
        cache: &'a ThreadCache,
        event_sender: &'a Sender<AppEvent>,
        comments_repository: &'a C,
        likes_repository: &'a L,
        profiles_repository: &'a P,
    ) -> Self {
        Self {
            ctx,
            comments_repository,
            like_service: LikeService::new(likes_repository),
            profile_service: ProfileService::new(profiles_repository),
            cache,
            event_sender,
        }
    }

    fn thread_key(&self, content_id: &str) -> ThreadKey {
        ThreadKey::new(self.comments_repository.kind(), content_id)
    }

    pub async fn get_thread(&self, content_id: &str) -> CtxResult<Vec<CommentView>> {
        let key = self.thread_key(content_id);
        let viewer_id = self.ctx.viewer_id();

        if let Some(comments) = self.cache.get(&key, viewer_id) {
            return Ok(comments);
        }
        let generation = self.cache.generation();

        let comments = self
            .comments_repository
            .list_by_content(content_id)
            .await
            .map_err(|err| {
                self.ctx.to_ctx_error(AppError::DataUnavailable {
                    source: format!("{err:?}"),
                })
            })?;

        let author_ids = comments
            .iter()
            .map(|c| c.created_by.clone())
            .collect::<Vec<String>>();
        let comment_ids = comments
            .iter()
            .map(|c| c.id.clone())
            .collect::<Vec<String>>();

        let (authors, likes) = tokio::join!(
            self.profile_service.resolve(&author_ids),
            self.like_service.summaries(&comment_ids, viewer_id)
        );

        let tree = build_comment_tree(comments, &authors, &likes);
        self.cache.store(&key, viewer_id, generation, tree.clone());
        Ok(tree)
    }

    pub async fn create_comment(
        &self,
        content_id: &str,
        input: CommentInput,
    ) -> CtxResult<CommentView> {
        let (user_id, content) = self.check_input(input)?;

        let comment = self
            .comments_repository
            .create(CreateComment {
                belongs_to: content_id.to_string(),
                created_by: user_id.clone(),
                content,
                parent: None,
            })
            .await
            .map_err(CtxError::from(self.ctx))?;

        tracing::info!("comment {} created on {content_id} by {user_id}", comment.id);
        self.on_created(comment).await
    }

    pub async fn create_reply(
        &self,
        content_id: &str,
        parent_id: &str,
        input: CommentInput,
    ) -> CtxResult<CommentView> {
        let (user_id, content) = self.check_input(input)?;

        let parent = self
            .comments_repository
            .get_by_id(parent_id)
            .await
            .map_err(CtxError::from(self.ctx))?;

        match parent {
            Some(parent) if parent.belongs_to == content_id && parent.is_root() => {}
            _ => {
                return Err(self.ctx.to_ctx_error(AppError::ParentNotFound {
                    ident: parent_id.to_string(),
                }))
            }
        };

        let reply = self
            .comments_repository
            .create(CreateComment {
                belongs_to: content_id.to_string(),
                created_by: user_id.clone(),
                content,
                parent: Some(parent_id.to_string()),
            })
            .await
            .map_err(CtxError::from(self.ctx))?;

        tracing::info!("reply {} to {parent_id} created by {user_id}", reply.id);
        self.on_created(reply).await
    }

    pub async fn toggle_like(&self, comment_id: &str) -> CtxResult<LikeToggle> {
        let user_id = self.ctx.user_id()?;

        let comment = self
            .comments_repository
            .get_by_id(comment_id)
            .await
            .map_err(CtxError::from(self.ctx))?
            .ok_or_else(|| {
                self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                    ident: comment_id.to_string(),
                })
            })?;

        let status = self
            .like_service
            .toggle(&comment.id, &user_id)
            .await
            .map_err(CtxError::from(self.ctx))?;

        let key = self.thread_key(&comment.belongs_to);
        self.cache.invalidate(&key);

        let likes_count = self.like_service.summary(&comment.id, None).await.count;
        tracing::info!(
            "like on comment {} {status:?} by {user_id}, count={likes_count}",
            comment.id
        );

        self.publish(
            user_id,
            key,
            AppEventType::CommentLikeToggled {
                comment_id: comment.id,
                likes_count,
            },
        );

        Ok(LikeToggle {
            status,
            likes_count,
        })
    }

    /// Viewer first, then blank text, then length. Nothing here touches storage.
    fn check_input(&self, input: CommentInput) -> CtxResult<(String, String)> {
        let user_id = self.ctx.user_id()?;

        let content = input.content.trim().to_string();
        if content.is_empty() {
            return Err(self.ctx.to_ctx_error(AppError::EmptyContent));
        }

        let input = CommentInput { content };
        input.validate().map_err(CtxError::from(self.ctx))?;

        Ok((user_id, input.content))
    }

    async fn on_created(&self, comment: Comment) -> CtxResult<CommentView> {
        let key = self.thread_key(&comment.belongs_to);
        self.cache.invalidate(&key);

        let user_id = comment.created_by.clone();
        let mut authors = self
            .profile_service
            .resolve(std::slice::from_ref(&user_id))
            .await;
        let author = authors
            .remove(&user_id)
            .unwrap_or_else(|| AuthorView::unknown(&user_id));

        let view = CommentView::new(comment, author, LikeSummary::default());
        self.publish(user_id, key, AppEventType::CommentCreated(view.clone()));
        Ok(view)
    }

    fn publish(&self, user_id: String, thread: ThreadKey, event: AppEventType) {
        // no subscribers is not an error
        let _ = self.event_sender.send(AppEvent {
            user_id,
            thread,
            event,
        });
    }
}
