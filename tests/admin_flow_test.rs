//! Admin screen flows: bucket loading, state-driven pagination and hard
//! delete.

mod common;

use common::{mount_auth, next_message, test_app, todo_json};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use qboard::app::{AppMessage, Modal, PageData, PageState, Route, RowRef};
use qboard::models::DeletedKind;

fn deleted_items_body(todo_task: &str, total_questions: u64) -> serde_json::Value {
    json!({
        "todos": {"items": [todo_json("dt1", todo_task, false)], "total_items": 1},
        "questions": {"items": [], "total_items": total_questions},
        "answers": {"items": [], "total_items": 0}
    })
}

#[tokio::test]
async fn test_admin_page_loads_three_buckets() {
    let server = MockServer::start().await;
    mount_auth(&server, true).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/deleted-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deleted_items_body("old todo", 0)))
        .mount(&server)
        .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::Admin);
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    assert!(app.is_admin);
    let PageState::Ready(PageData::Admin(buckets)) = &app.page else {
        panic!("expected admin page");
    };
    assert_eq!(buckets.todos.as_ref().unwrap().items[0].task, "old todo");
    assert!(buckets.questions.as_ref().unwrap().items.is_empty());
    assert_eq!(
        app.rows(),
        vec![RowRef::AdminItem {
            kind: DeletedKind::Todos,
            id: "dt1".to_string()
        }]
    );
}

#[tokio::test]
async fn test_bucket_pagination_refetches_one_bucket() {
    let server = MockServer::start().await;
    mount_auth(&server, true).await;
    // Initial load: page 1 everywhere; 25 deleted questions => 3 pages.
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/deleted-items"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deleted_items_body("t", 25)))
        .mount(&server)
        .await;
    // Bucket jump to page 2.
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/deleted-items"))
        .and(query_param("skip", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "todos": {"items": [], "total_items": 1},
            "questions": {
                "items": [{
                    "id": "dq11",
                    "subject": "page two question",
                    "content": "",
                    "creator_ip": "10.0.0.2",
                    "created_at": "2026-03-01T08:00:00Z",
                    "answer_count": 0
                }],
                "total_items": 25
            },
            "answers": {"items": [], "total_items": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::Admin);
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    let nav = app.bucket_nav(DeletedKind::Questions).unwrap();
    assert_eq!(nav.total_pages, 3);
    assert_eq!(nav.next, Some(2));

    app.change_bucket_page(DeletedKind::Questions, 2);
    let message = next_message(&mut rx).await;
    assert!(matches!(
        message,
        AppMessage::AdminBucketLoaded {
            kind: DeletedKind::Questions,
            page: 2,
            ..
        }
    ));
    app.handle_message(message);

    assert_eq!(app.admin_pages.questions, 2);
    let PageState::Ready(PageData::Admin(buckets)) = &app.page else {
        panic!("expected admin page");
    };
    // Only the questions bucket was replaced.
    assert_eq!(
        buckets.questions.as_ref().unwrap().items[0].subject,
        "page two question"
    );
    assert_eq!(buckets.todos.as_ref().unwrap().items.len(), 1);
}

#[tokio::test]
async fn test_hard_delete_confirms_then_reloads() {
    let server = MockServer::start().await;
    mount_auth(&server, true).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/deleted-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deleted_items_body("t", 0)))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/admin/hard-delete/todos/dt1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::Admin);
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    app.request_admin_hard_delete(DeletedKind::Todos, "dt1");
    let Some(Modal::Confirm { action, .. }) = app.modal.clone() else {
        panic!("expected confirm dialog");
    };
    app.modal = None;
    app.run_confirmed(action);

    let message = next_message(&mut rx).await;
    app.handle_message(message);

    // Acknowledged, and the admin page reloads.
    assert!(matches!(app.modal, Some(Modal::Info(_))));
    let message = next_message(&mut rx).await;
    app.handle_message(message);
    assert!(matches!(app.page, PageState::Ready(PageData::Admin(_))));
}

#[tokio::test]
async fn test_bucket_error_is_inline_not_fatal() {
    let server = MockServer::start().await;
    mount_auth(&server, true).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/deleted-items"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Forbidden"})))
        .mount(&server)
        .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::Admin);
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    // The page itself renders; each bucket carries its own error.
    let PageState::Ready(PageData::Admin(buckets)) = &app.page else {
        panic!("expected admin page, got {:?}", app.page);
    };
    assert!(buckets.todos.is_err());
    assert!(buckets.questions.is_err());
    assert!(buckets.answers.is_err());
    assert!(app.modal.is_none());
}
