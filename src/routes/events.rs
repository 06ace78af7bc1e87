use std::convert::Infallible;
use std::sync::Arc;

use crate::{
    entities::content_kind::ContentKind,
    middleware::{error::CtxResult, mw_ctx::CtxState},
    utils::thread_cache::ThreadKey,
};
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive},
        Sse,
    },
    routing::get,
    Router,
};
use futures::Stream;
use serde_json::json;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route(
        "/api/:kind/:content_id/comments/events",
        get(get_thread_events),
    )
}

async fn get_thread_events(
    State(state): State<Arc<CtxState>>,
    Path((kind, content_id)): Path<(ContentKind, String)>,
) -> CtxResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let thread = ThreadKey::new(kind, content_id);

    let rx = state.event_sender.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(move |msg| match msg {
        Err(err) => {
            tracing::debug!("thread event stream lagged: {err}");
            None
        }
        Ok(msg) if msg.thread == thread => {
            Some(Ok(Event::default().data(json!(msg).to_string())))
        }
        Ok(_) => None,
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
