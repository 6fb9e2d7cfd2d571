//! Shared helpers for app-level integration tests.
#![allow(dead_code)] // each test binary uses a different subset

use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use qboard::app::{App, AppMessage};
use qboard::config::Config;

/// Build an app wired to a wiremock server.
pub fn test_app(server: &MockServer) -> (App, UnboundedReceiver<AppMessage>) {
    let config = Config::default()
        .with_api_base_url(format!("{}/api/v1", server.uri()))
        .without_log_file();
    App::new(&config)
}

/// Wait for the next message from the app's network tasks.
pub async fn next_message(rx: &mut UnboundedReceiver<AppMessage>) -> AppMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for an app message")
        .expect("message channel closed")
}

/// Mount the admin status probe.
pub async fn mount_auth(server: &MockServer, is_admin: bool) {
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_admin": is_admin})))
        .mount(server)
        .await;
}

/// A todo in wire shape.
pub fn todo_json(id: &str, task: &str, completed: bool) -> Value {
    json!({
        "id": id,
        "task": task,
        "due_date": null,
        "is_completed": completed,
        "creator_ip": "127.0.0.1",
        "created_at": "2026-01-01T09:00:00Z",
        "updated_at": null
    })
}

/// An answer in wire shape.
pub fn answer_json(id: &str, reply_count: u64, replies: Vec<Value>, deleted: bool) -> Value {
    json!({
        "id": id,
        "question_id": "q1",
        "parent_id": null,
        "content": if deleted { Value::Null } else { json!(format!("content of {id}")) },
        "creator_ip": "10.0.0.1",
        "created_at": "2026-02-01T12:00:00Z",
        "updated_at": null,
        "deleted_at": if deleted { json!("2026-02-02T12:00:00Z") } else { Value::Null },
        "reply_count": reply_count,
        "replies": replies
    })
}

/// A question detail in wire shape.
pub fn question_json(id: &str, answers: Vec<Value>) -> Value {
    json!({
        "id": id,
        "subject": format!("subject of {id}"),
        "content": "question body",
        "creator_ip": "10.0.0.2",
        "created_at": "2026-03-01T08:00:00Z",
        "updated_at": null,
        "answer_count": answers.len(),
        "answers": answers
    })
}
