use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use crate::{
    middleware::error::CtxResult, models::view::comment::CommentView,
    utils::thread_cache::ThreadKey,
};

/// Handed out by `ThreadViewState::open`; only the latest ticket may apply results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTicket {
    key: ThreadKey,
    seq: u64,
}

impl ViewTicket {
    pub fn key(&self) -> &ThreadKey {
        &self.key
    }
}

#[derive(Default)]
struct ViewInner {
    seq: u64,
    current: Option<ThreadKey>,
    comments: Vec<CommentView>,
}

/// The thread a client is currently showing. Switching to another content
/// item supersedes every fetch still in flight for the previous one.
#[derive(Default)]
pub struct ThreadViewState {
    inner: Mutex<ViewInner>,
}

impl ThreadViewState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ViewInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn open(&self, key: ThreadKey) -> ViewTicket {
        let mut inner = self.lock();
        inner.seq += 1;
        inner.current = Some(key.clone());
        inner.comments.clear();
        ViewTicket {
            key,
            seq: inner.seq,
        }
    }

    pub fn apply(&self, ticket: &ViewTicket, comments: Vec<CommentView>) -> bool {
        let mut inner = self.lock();
        if inner.seq != ticket.seq {
            tracing::debug!("dropping superseded thread {:?}", ticket.key);
            return false;
        }
        inner.comments = comments;
        true
    }

    /// Opens `key`, awaits `fetch` and applies its result unless another open happened meanwhile.
    pub async fn load<F>(&self, key: ThreadKey, fetch: F) -> CtxResult<bool>
    where
        F: Future<Output = CtxResult<Vec<CommentView>>>,
    {
        let ticket = self.open(key);
        let comments = fetch.await?;
        Ok(self.apply(&ticket, comments))
    }

    pub fn current(&self) -> Option<ThreadKey> {
        self.lock().current.clone()
    }

    pub fn comments(&self) -> Vec<CommentView> {
        self.lock().comments.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::content_kind::ContentKind;
    use crate::middleware::error::{AppError, CtxError};
    use crate::models::view::author::AuthorView;
    use chrono::Utc;
    use tokio::sync::oneshot;

    fn view(id: &str, belongs_to: &str) -> CommentView {
        CommentView {
            id: id.to_string(),
            belongs_to: belongs_to.to_string(),
            parent_id: None,
            content: "hi".to_string(),
            author: AuthorView::unknown("alice"),
            created_at: Utc::now(),
            likes_count: 0,
            liked_by_viewer: false,
            replies: vec![],
        }
    }

    #[test]
    fn open_then_apply() {
        let state = ThreadViewState::new();
        let key = ThreadKey::new(ContentKind::Article, "rust-tips");

        let ticket = state.open(key.clone());
        assert_eq!(state.current(), Some(key));
        assert!(state.comments().is_empty());

        assert!(state.apply(&ticket, vec![view("c1", "rust-tips")]));
        assert_eq!(state.comments().len(), 1);
    }

    #[test]
    fn superseded_ticket_is_rejected() {
        let state = ThreadViewState::new();
        let first = state.open(ThreadKey::new(ContentKind::Post, "a"));
        let second = state.open(ThreadKey::new(ContentKind::Post, "b"));

        assert!(!state.apply(&first, vec![view("c1", "a")]));
        assert!(state.comments().is_empty());
        assert!(state.apply(&second, vec![view("c2", "b")]));
        assert_eq!(state.comments()[0].belongs_to, "b");
        assert_eq!(second.key().content_id, "b");
    }

    #[tokio::test]
    async fn slow_load_for_previous_item_is_discarded() {
        let state = ThreadViewState::new();
        let (tx, rx) = oneshot::channel::<Vec<CommentView>>();

        let slow = state.load(ThreadKey::new(ContentKind::Startup, "old"), async move {
            Ok::<_, CtxError>(rx.await.unwrap_or_default())
        });
        let switch = async {
            tokio::task::yield_now().await;
            let applied = state
                .load(ThreadKey::new(ContentKind::Startup, "new"), async {
                    Ok::<_, CtxError>(vec![view("c9", "new")])
                })
                .await
                .unwrap();
            tx.send(vec![view("c1", "old")]).unwrap();
            applied
        };

        let (slow, switched) = tokio::join!(slow, switch);
        assert!(!slow.unwrap());
        assert!(switched);
        assert_eq!(
            state.current(),
            Some(ThreadKey::new(ContentKind::Startup, "new"))
        );
        assert_eq!(state.comments()[0].id, "c9");
    }

    #[tokio::test]
    async fn failed_load_keeps_view_empty() {
        let state = ThreadViewState::new();
        let result = state
            .load(ThreadKey::new(ContentKind::Post, "a"), async {
                Err::<Vec<CommentView>, CtxError>(
                    AppError::DataUnavailable {
                        source: "down".to_string(),
                    }
                    .into(),
                )
            })
            .await;
        assert!(result.is_err());
        assert!(state.comments().is_empty());
    }
}
