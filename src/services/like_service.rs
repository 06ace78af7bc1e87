use std::collections::HashMap;

use crate::{
    interfaces::repositories::like::CommentLikesRepositoryInterface,
    middleware::error::{AppError, AppResult},
    models::view::like::{LikeStatus, LikeSummary},
};

pub struct LikeService<'a, L>
where
    L: CommentLikesRepositoryInterface,
{
    likes_repository: &'a L,
}

impl<'a, L> LikeService<'a, L>
where
    L: CommentLikesRepositoryInterface,
{
    pub fn new(likes_repository: &'a L) -> Self {
        Self { likes_repository }
    }

    /// Never fails: a lookup error degrades to no likes.
    pub async fn summary(&self, comment_id: &str, viewer_id: Option<&str>) -> LikeSummary {
        let count = self.likes_repository.count(comment_id);
        let liked = async {
            match viewer_id {
                Some(user_id) => self.likes_repository.has_liked(comment_id, user_id).await,
                None => Ok(false),
            }
        };

        match tokio::join!(count, liked) {
            (Ok(count), Ok(viewer_has_liked)) => LikeSummary {
                count,
                viewer_has_liked,
            },
            (count, liked) => {
                tracing::warn!(
                    "like lookup failed for comment {comment_id}: count={:?} liked={:?}",
                    count.as_ref().err(),
                    liked.as_ref().err()
                );
                LikeSummary::default()
            }
        }
    }

    /// Batched form of `summary`. Every requested id gets an entry.
    pub async fn summaries(
        &self,
        comment_ids: &[String],
        viewer_id: Option<&str>,
    ) -> HashMap<String, LikeSummary> {
        if comment_ids.is_empty() {
            return HashMap::new();
        }

        let counts = self.likes_repository.count_many(comment_ids);
        let liked = async {
            match viewer_id {
                Some(user_id) => self.likes_repository.liked_by_user(comment_ids, user_id).await,
                None => Ok(Default::default()),
            }
        };
        let (counts, liked) = tokio::join!(counts, liked);

        let counts = counts.unwrap_or_else(|err| {
            tracing::warn!("like counts failed for {} comments: {err:?}", comment_ids.len());
            HashMap::new()
        });
        let liked = liked.unwrap_or_else(|err| {
            tracing::warn!("viewer likes failed for {} comments: {err:?}", comment_ids.len());
            Default::default()
        });

        comment_ids
            .iter()
            .map(|id| {
                (
                    id.clone(),
                    LikeSummary {
                        count: counts.get(id).copied().unwrap_or(0),
                        viewer_has_liked: liked.contains(id),
                    },
                )
            })
            .collect()
    }

    /// Flips the viewer's like. Only the storage write can fail; the new count
    /// is read separately with `summary` once the write is in.
    pub async fn toggle(&self, comment_id: &str, user_id: &str) -> AppResult<LikeStatus> {
        if self.likes_repository.has_liked(comment_id, user_id).await? {
            self.likes_repository.unlike(comment_id, user_id).await?;
            return Ok(LikeStatus::Removed);
        }

        match self.likes_repository.like(comment_id, user_id).await {
            Ok(()) => Ok(LikeStatus::Added),
            Err(AppError::DuplicateLike) => {
                tracing::debug!("comment {comment_id} already liked by {user_id}");
                Ok(LikeStatus::Added)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Like pairs kept in a set, mirroring the unique index of the real store.
    #[derive(Default)]
    pub(crate) struct MemoryLikes {
        pub(crate) pairs: Mutex<HashSet<(String, String)>>,
        pub(crate) fail_reads: bool,
        pub(crate) fail_counts: bool,
    }

    fn down() -> AppError {
        AppError::SurrealDb {
            source: "down".to_string(),
        }
    }

    #[async_trait]
    impl CommentLikesRepositoryInterface for MemoryLikes {
        async fn count(&self, comment_id: &str) -> AppResult<u32> {
            if self.fail_reads || self.fail_counts {
                return Err(down());
            }
            let pairs = self.pairs.lock().unwrap();
            Ok(pairs.iter().filter(|(c, _)| c == comment_id).count() as u32)
        }

        async fn has_liked(&self, comment_id: &str, user_id: &str) -> AppResult<bool> {
            if self.fail_reads {
                return Err(down());
            }
            let pairs = self.pairs.lock().unwrap();
            Ok(pairs.contains(&(comment_id.to_string(), user_id.to_string())))
        }

        async fn count_many(&self, comment_ids: &[String]) -> AppResult<HashMap<String, u32>> {
            if self.fail_reads {
                return Err(down());
            }
            let pairs = self.pairs.lock().unwrap();
            let mut counts = HashMap::new();
            for (c, _) in pairs.iter().filter(|(c, _)| comment_ids.contains(c)) {
                *counts.entry(c.clone()).or_insert(0) += 1;
            }
            Ok(counts)
        }

        async fn liked_by_user(
            &self,
            comment_ids: &[String],
            user_id: &str,
        ) -> AppResult<HashSet<String>> {
            if self.fail_reads {
                return Err(down());
            }
            let pairs = self.pairs.lock().unwrap();
            Ok(pairs
                .iter()
                .filter(|(c, u)| u == user_id && comment_ids.contains(c))
                .map(|(c, _)| c.clone())
                .collect())
        }

        async fn like(&self, comment_id: &str, user_id: &str) -> AppResult<()> {
            let mut pairs = self.pairs.lock().unwrap();
            if pairs.insert((comment_id.to_string(), user_id.to_string())) {
                Ok(())
            } else {
                Err(AppError::DuplicateLike)
            }
        }

        async fn unlike(&self, comment_id: &str, user_id: &str) -> AppResult<bool> {
            let mut pairs = self.pairs.lock().unwrap();
            Ok(pairs.remove(&(comment_id.to_string(), user_id.to_string())))
        }
    }

    #[tokio::test]
    async fn toggle_twice_restores_state() {
        let repo = MemoryLikes::default();
        repo.like("c1", "carol").await.unwrap();
        let service = LikeService::new(&repo);

        assert_eq!(service.toggle("c1", "dave").await.unwrap(), LikeStatus::Added);
        assert_eq!(service.summary("c1", Some("dave")).await.count, 2);

        assert_eq!(service.toggle("c1", "dave").await.unwrap(), LikeStatus::Removed);
        let summary = service.summary("c1", Some("dave")).await;
        assert_eq!(summary.count, 1);
        assert!(!summary.viewer_has_liked);
    }

    /// Sees no like on the check, then loses the insert to a concurrent toggle.
    struct RacedLikes {
        inner: MemoryLikes,
    }

    #[async_trait]
    impl CommentLikesRepositoryInterface for RacedLikes {
        async fn count(&self, comment_id: &str) -> AppResult<u32> {
            self.inner.count(comment_id).await
        }

        async fn has_liked(&self, _comment_id: &str, _user_id: &str) -> AppResult<bool> {
            Ok(false)
        }

        async fn count_many(&self, comment_ids: &[String]) -> AppResult<HashMap<String, u32>> {
            self.inner.count_many(comment_ids).await
        }

        async fn liked_by_user(
            &self,
            comment_ids: &[String],
            user_id: &str,
        ) -> AppResult<HashSet<String>> {
            self.inner.liked_by_user(comment_ids, user_id).await
        }

        async fn like(&self, comment_id: &str, user_id: &str) -> AppResult<()> {
            self.inner.like(comment_id, user_id).await
        }

        async fn unlike(&self, comment_id: &str, user_id: &str) -> AppResult<bool> {
            self.inner.unlike(comment_id, user_id).await
        }
    }

    #[tokio::test]
    async fn lost_insert_race_counts_as_added() {
        let repo = RacedLikes {
            inner: MemoryLikes::default(),
        };
        repo.inner.like("c1", "dave").await.unwrap();
        let service = LikeService::new(&repo);

        assert_eq!(service.toggle("c1", "dave").await.unwrap(), LikeStatus::Added);
        assert_eq!(service.summary("c1", None).await.count, 1);
        assert_eq!(repo.inner.pairs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_insert_counts_once() {
        let repo = MemoryLikes::default();
        let service = LikeService::new(&repo);

        repo.like("c1", "dave").await.unwrap();
        assert!(matches!(
            repo.like("c1", "dave").await,
            Err(AppError::DuplicateLike)
        ));

        let (a, b) = tokio::join!(service.summary("c1", Some("dave")), service.summary("c1", None));
        assert_eq!(a.count, 1);
        assert!(a.viewer_has_liked);
        assert!(!b.viewer_has_liked);
    }

    #[tokio::test]
    async fn summaries_cover_every_id() {
        let repo = MemoryLikes::default();
        repo.like("c1", "dave").await.unwrap();
        repo.like("c1", "erin").await.unwrap();
        repo.like("c2", "erin").await.unwrap();
        let service = LikeService::new(&repo);

        let ids = vec!["c1".to_string(), "c2".to_string(), "c3".to_string()];
        let summaries = service.summaries(&ids, Some("dave")).await;

        assert_eq!(summaries.len(), 3);
        assert_eq!(
            summaries["c1"],
            LikeSummary {
                count: 2,
                viewer_has_liked: true
            }
        );
        assert_eq!(summaries["c2"].count, 1);
        assert!(!summaries["c2"].viewer_has_liked);
        assert_eq!(summaries["c3"], LikeSummary::default());
    }

    #[tokio::test]
    async fn read_failure_degrades() {
        let repo = MemoryLikes {
            fail_reads: true,
            ..Default::default()
        };
        let service = LikeService::new(&repo);

        assert_eq!(
            service.summary("c1", Some("dave")).await,
            LikeSummary::default()
        );
        let summaries = service.summaries(&["c1".to_string()], Some("dave")).await;
        assert_eq!(summaries["c1"], LikeSummary::default());
    }
}
