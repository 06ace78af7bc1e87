use crate::{
    database::client::Database,
    entities::profile::Profile,
    middleware::{error::AppResult, mw_ctx::CtxState},
    routes::{comments, events},
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub async fn create_default_data_for_dev(ctx_state: &CtxState) -> AppResult<()> {
    if !ctx_state.is_development {
        return Ok(());
    }

    let profiles = [
        ("alice", "Alice Founder"),
        ("bob", "Bob Builder"),
    ];
    for (id, full_name) in profiles {
        ctx_state
            .db
            .profiles
            .upsert(Profile {
                id: id.to_string(),
                full_name: Some(full_name.to_string()),
                username: Some(id.to_string()),
                avatar_url: None,
            })
            .await?;
        let token = ctx_state.jwt.create(id, None)?;
        tracing::info!("->> dev profile {id} token: {token}");
    }
    Ok(())
}

pub async fn run_migrations(database: &Database) -> AppResult<()> {
    database.run_migrations().await
}

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(comments::routes())
        .merge(events::routes())
        .with_state(ctx_state.clone())
        .layer(TraceLayer::new_for_http())
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
