//! Toggle-session flows: the delete form borrowed for a password-guarded
//! completion toggle, with guaranteed restoration.

mod common;

use common::{mount_auth, next_message, test_app, todo_json};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use qboard::app::{Modal, Route};
use qboard::state::forms::{FormAction, PLACEHOLDER_DELETE, PLACEHOLDER_TOGGLE};
use qboard::state::{ItemKey, SubView};

async fn mount_todo_list(server: &MockServer, completed: bool) {
    Mock::given(method("GET"))
        .and(path("/api/v1/todo/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [todo_json("t1", "Water plants", completed)],
            "total_items": 1
        })))
        .mount(server)
        .await;
}

async fn loaded_app(
    server: &MockServer,
) -> (
    qboard::app::App,
    tokio::sync::mpsc::UnboundedReceiver<qboard::app::AppMessage>,
) {
    let (mut app, mut rx) = test_app(server);
    app.navigate(Route::TodoList { page: 1 });
    let message = next_message(&mut rx).await;
    app.handle_message(message);
    (app, rx)
}

fn delete_form_snapshot(app: &qboard::app::App, key: &ItemKey) -> (FormAction, String, String) {
    let form = app
        .forms
        .get(key)
        .and_then(|forms| forms.form(SubView::Delete))
        .expect("delete form present");
    (
        form.action.clone(),
        form.submit_label.clone(),
        form.password_placeholder().to_string(),
    )
}

#[tokio::test]
async fn test_begin_repurposes_delete_form() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_todo_list(&server, false).await;
    let (mut app, _rx) = loaded_app(&server).await;

    let key = ItemKey::todo("t1");
    app.begin_toggle("t1");

    assert!(app.toggle.is_some());
    assert_eq!(app.views.mode(&key), SubView::Delete);
    let (action, label, placeholder) = delete_form_snapshot(&app, &key);
    assert_eq!(
        action,
        FormAction::ToggleTodo {
            id: "t1".to_string(),
            desired: true,
        }
    );
    assert_eq!(label, "Change status");
    assert_eq!(placeholder, PLACEHOLDER_TOGGLE);

    // The checkbox flips optimistically.
    let todo = app.current_todo("t1").unwrap().clone();
    assert!(app.todo_checked(&todo));
}

#[tokio::test]
async fn test_cancel_restores_bindings_checkbox_and_password() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_todo_list(&server, false).await;
    let (mut app, _rx) = loaded_app(&server).await;

    let key = ItemKey::todo("t1");
    let before = delete_form_snapshot(&app, &key);

    app.begin_toggle("t1");
    {
        let form = app
            .forms
            .get_mut(&key)
            .and_then(|forms| forms.form_mut(SubView::Delete))
            .unwrap();
        form.fields[0].value = "half-typed".to_string();
    }
    app.cancel_item_form(key.clone(), SubView::Delete);

    assert!(app.toggle.is_none());
    assert_eq!(app.views.mode(&key), SubView::View);
    let after = delete_form_snapshot(&app, &key);
    assert_eq!(after, before);
    assert_eq!(after.2, PLACEHOLDER_DELETE);
    let form = app
        .forms
        .get(&key)
        .and_then(|forms| forms.form(SubView::Delete))
        .unwrap();
    assert_eq!(form.password(), "");
    // Checkbox back to the pre-click value.
    let todo = app.current_todo("t1").unwrap().clone();
    assert!(!app.todo_checked(&todo));
}

#[tokio::test]
async fn test_server_error_aborts_like_cancellation() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_todo_list(&server, false).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/todo/t1/complete"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Wrong password."})))
        .mount(&server)
        .await;
    let (mut app, mut rx) = loaded_app(&server).await;

    let key = ItemKey::todo("t1");
    let before = delete_form_snapshot(&app, &key);

    app.begin_toggle("t1");
    {
        let form = app
            .forms
            .get_mut(&key)
            .and_then(|forms| forms.form_mut(SubView::Delete))
            .unwrap();
        form.fields[0].value = "nope".to_string();
    }
    app.submit_item_form(key.clone(), SubView::Delete);
    assert!(app.toggle_pending);

    let message = next_message(&mut rx).await;
    app.handle_message(message);

    // Restoration is identical to cancellation, plus the error dialog.
    assert!(app.toggle.is_none());
    assert!(!app.toggle_pending);
    assert!(matches!(app.modal, Some(Modal::Error(_))));
    assert_eq!(app.views.mode(&key), SubView::View);
    assert_eq!(delete_form_snapshot(&app, &key), before);
    let todo = app.current_todo("t1").unwrap().clone();
    assert!(!app.todo_checked(&todo));
}

#[tokio::test]
async fn test_successful_toggle_reloads_the_list() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_todo_list(&server, false).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/todo/t1/complete"))
        .and(body_json(json!({"password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_completed": true})))
        .expect(1)
        .mount(&server)
        .await;
    let (mut app, mut rx) = loaded_app(&server).await;

    let key = ItemKey::todo("t1");
    app.begin_toggle("t1");
    {
        let form = app
            .forms
            .get_mut(&key)
            .and_then(|forms| forms.form_mut(SubView::Delete))
            .unwrap();
        form.fields[0].value = "pw".to_string();
    }
    app.submit_item_form(key.clone(), SubView::Delete);

    let message = next_message(&mut rx).await;
    app.handle_message(message);

    // Success discards the session and re-fetches the enclosing list.
    assert!(app.toggle.is_none());
    let message = next_message(&mut rx).await;
    app.handle_message(message);
    assert!(matches!(app.page, qboard::app::PageState::Ready(_)));
    assert_eq!(app.views.mode(&key), SubView::View);
}

#[tokio::test]
async fn test_empty_password_blocks_submission() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_todo_list(&server, false).await;
    let (mut app, _rx) = loaded_app(&server).await;

    let key = ItemKey::todo("t1");
    app.begin_toggle("t1");
    app.submit_item_form(key.clone(), SubView::Delete);

    // No request was made (no mock mounted for the endpoint would have
    // panicked the task); the session survives for a retry.
    assert!(matches!(app.modal, Some(Modal::Error(_))));
    assert!(app.toggle.is_some());
    assert!(!app.toggle_pending);
    assert_eq!(app.views.mode(&key), SubView::Delete);
}

#[tokio::test]
async fn test_second_begin_while_session_live_is_refused() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_todo_list(&server, false).await;
    let (mut app, _rx) = loaded_app(&server).await;

    app.begin_toggle("t1");
    let desired_before = app.toggle.as_ref().unwrap().desired;

    // A second begin while the first session is live must not run.
    app.begin_toggle("t1");
    assert_eq!(app.toggle.as_ref().unwrap().desired, desired_before);
}
