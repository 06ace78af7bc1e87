pub mod comment_helpers;
pub mod test_with_server;

use fake::{faker, Fake};
use founderhub_server::entities::profile::Profile;
use founderhub_server::middleware::mw_ctx::CtxState;

pub struct TestFounder {
    pub id: String,
    pub full_name: String,
    pub token: String,
}

#[allow(dead_code)]
pub async fn create_fake_founder(ctx_state: &CtxState) -> TestFounder {
    let username = faker::internet::en::Username()
        .fake::<String>()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    let id = format!("f_{username}_{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let full_name = faker::name::en::Name().fake::<String>();
    create_founder(ctx_state, &id, Some(full_name.as_str())).await
}

#[allow(dead_code)]
pub async fn create_founder(
    ctx_state: &CtxState,
    id: &str,
    full_name: Option<&str>,
) -> TestFounder {
    ctx_state
        .db
        .profiles
        .upsert(Profile {
            id: id.to_string(),
            full_name: full_name.map(str::to_string),
            username: Some(id.to_string()),
            avatar_url: None,
        })
        .await
        .expect("profile upsert");

    let token = ctx_state
        .jwt
        .create(id, Some(format!("{id}@founderhub.test").as_str()))
        .expect("token");

    TestFounder {
        id: id.to_string(),
        full_name: full_name.unwrap_or(id).to_string(),
        token,
    }
}
