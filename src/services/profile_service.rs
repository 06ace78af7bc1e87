use std::collections::{BTreeSet, HashMap};

use crate::{
    interfaces::repositories::profile::ProfilesRepositoryInterface,
    models::view::author::AuthorView,
};

pub struct ProfileService<'a, P>
where
    P: ProfilesRepositoryInterface,
{
    profiles_repository: &'a P,
}

impl<'a, P> ProfileService<'a, P>
where
    P: ProfilesRepositoryInterface,
{
    pub fn new(profiles_repository: &'a P) -> Self {
        Self {
            profiles_repository,
        }
    }

    /// Every requested id gets an entry; unresolved ids get the unknown-user identity.
    pub async fn resolve(&self, user_ids: &[String]) -> HashMap<String, AuthorView> {
        let ids = user_ids
            .iter()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect::<Vec<String>>();

        if ids.is_empty() {
            return HashMap::new();
        }

        let mut authors = match self.profiles_repository.get_by_ids(&ids).await {
            Ok(profiles) => profiles
                .into_iter()
                .map(|p| (p.id.clone(), AuthorView::from(p)))
                .collect::<HashMap<String, AuthorView>>(),
            Err(err) => {
                tracing::warn!("profile lookup failed for {} authors: {err:?}", ids.len());
                HashMap::new()
            }
        };

        for id in ids {
            authors
                .entry(id)
                .or_insert_with_key(|id| AuthorView::unknown(id));
        }
        authors
    }
}
