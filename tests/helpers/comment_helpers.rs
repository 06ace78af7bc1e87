use axum_test::{TestResponse, TestServer};
use fake::{faker, Fake};
use founderhub_server::models::view::comment::CommentView;
use founderhub_server::routes::comments::{CommentCreatedResponse, ThreadResponse};
use serde_json::json;

#[allow(dead_code)]
pub async fn post_comment(
    server: &TestServer,
    kind: &str,
    content_id: &str,
    content: &str,
    token: Option<&str>,
) -> TestResponse {
    let mut request = server
        .post(format!("/api/{kind}/{content_id}/comments").as_str())
        .json(&json!({ "content": content }))
        .add_header("Accept", "application/json");
    if let Some(token) = token {
        request = request.add_header("Authorization", format!("Bearer {token}"));
    }
    request.await
}

#[allow(dead_code)]
pub async fn post_reply(
    server: &TestServer,
    kind: &str,
    content_id: &str,
    parent_id: &str,
    content: &str,
    token: Option<&str>,
) -> TestResponse {
    let mut request = server
        .post(format!("/api/{kind}/{content_id}/comments/{parent_id}/replies").as_str())
        .json(&json!({ "content": content }))
        .add_header("Accept", "application/json");
    if let Some(token) = token {
        request = request.add_header("Authorization", format!("Bearer {token}"));
    }
    request.await
}

#[allow(dead_code)]
pub async fn toggle_like(
    server: &TestServer,
    kind: &str,
    comment_id: &str,
    token: Option<&str>,
) -> TestResponse {
    let mut request = server
        .post(format!("/api/comments/{kind}/{comment_id}/like").as_str())
        .add_header("Accept", "application/json");
    if let Some(token) = token {
        request = request.add_header("Authorization", format!("Bearer {token}"));
    }
    request.await
}

#[allow(dead_code)]
pub async fn get_thread(
    server: &TestServer,
    kind: &str,
    content_id: &str,
    token: Option<&str>,
) -> ThreadResponse {
    let mut request = server
        .get(format!("/api/{kind}/{content_id}/comments").as_str())
        .add_header("Accept", "application/json");
    if let Some(token) = token {
        request = request.add_header("Authorization", format!("Bearer {token}"));
    }
    let response = request.await;
    response.assert_status_ok();
    response.json::<ThreadResponse>()
}

#[allow(dead_code)]
pub async fn create_fake_comment(
    server: &TestServer,
    kind: &str,
    content_id: &str,
    token: &str,
) -> CommentView {
    let content = faker::lorem::en::Sentence(3..10).fake::<String>();
    let response = post_comment(server, kind, content_id, &content, Some(token)).await;
    response.assert_status_success();
    response.json::<CommentCreatedResponse>().comment
}
