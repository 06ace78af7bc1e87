use serde::{Deserialize, Serialize};

use crate::entities::profile::Profile;

/// Shown when the profile exists but carries no name.
pub const ANONYMOUS_NAME: &str = "Anonymous";
/// Shown when no profile could be resolved for the author.
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl AuthorView {
    pub fn unknown(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            display_name: UNKNOWN_USER_NAME.to_string(),
            avatar_url: None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<Profile> for AuthorView {
    fn from(profile: Profile) -> Self {
        let display_name = non_blank(profile.full_name)
            .or_else(|| non_blank(profile.username))
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());

        AuthorView {
            id: profile.id,
            display_name,
            avatar_url: non_blank(profile.avatar_url),
        }
    }
}
