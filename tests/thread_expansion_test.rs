//! Question detail and lazy-expansion flows against a wiremock backend.

mod common;

use common::{answer_json, mount_auth, next_message, question_json, test_app};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use qboard::app::{Modal, Route, RowRef};
use qboard::state::{ItemKey, SubView};
use qboard::view_state::LoadMorePhase;

async fn mount_question(server: &MockServer, answers: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/api/v1/question/q1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(question_json("q1", answers)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_partial_thread_shows_load_more_row() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    // reply_count 5 but only two delivered: the boundary renders.
    mount_question(
        &server,
        vec![answer_json(
            "a1",
            5,
            vec![
                answer_json("a2", 0, vec![], false),
                answer_json("a3", 0, vec![], false),
            ],
            false,
        )],
    )
    .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::QuestionDetail {
        id: "q1".to_string(),
    });
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    let rows = app.rows();
    assert_eq!(
        rows,
        vec![
            RowRef::QuestionBody("q1".to_string()),
            RowRef::Answer("a1".to_string()),
            RowRef::Answer("a2".to_string()),
            RowRef::Answer("a3".to_string()),
            RowRef::LoadMore("a1".to_string()),
            RowRef::Composer,
        ]
    );
}

#[tokio::test]
async fn test_expansion_replaces_children_and_removes_control() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_question(
        &server,
        vec![answer_json(
            "a1",
            5,
            vec![
                answer_json("a2", 0, vec![], false),
                answer_json("a3", 0, vec![], false),
            ],
            false,
        )],
    )
    .await;
    // The expansion fetch returns the node with all five children fresh.
    let fresh: Vec<serde_json::Value> = (1..=5)
        .map(|i| answer_json(&format!("r{i}"), 0, vec![], false))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v1/answer/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_json("a1", 5, fresh, false)))
        .expect(1)
        .mount(&server)
        .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::QuestionDetail {
        id: "q1".to_string(),
    });
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    app.activate_load_more("a1");
    assert!(app.expansions.is_pending("a1"));
    // Disabled while pending: a second activation is a no-op (the mock
    // expects exactly one request).
    app.activate_load_more("a1");

    let message = next_message(&mut rx).await;
    app.handle_message(message);

    // Replaced, not appended; control gone.
    let rows = app.rows();
    assert_eq!(
        rows,
        vec![
            RowRef::QuestionBody("q1".to_string()),
            RowRef::Answer("a1".to_string()),
            RowRef::Answer("r1".to_string()),
            RowRef::Answer("r2".to_string()),
            RowRef::Answer("r3".to_string()),
            RowRef::Answer("r4".to_string()),
            RowRef::Answer("r5".to_string()),
            RowRef::Composer,
        ]
    );
    assert!(app.expansions.is_expanded("a1"));

    // The fresh nodes joined the view-state machine.
    assert!(app
        .views
        .is_registered(&ItemKey::answer("r3"), SubView::Reply));
}

#[tokio::test]
async fn test_failed_expansion_is_retryable() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_question(
        &server,
        vec![answer_json("a1", 2, vec![], false)],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/answer/a1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::QuestionDetail {
        id: "q1".to_string(),
    });
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    app.activate_load_more("a1");
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    // Failed but actionable again, with a blocking acknowledgment.
    assert!(app.expansions.is_failed("a1"));
    assert!(matches!(app.modal, Some(Modal::Error(_))));
    assert!(app.rows().contains(&RowRef::LoadMore("a1".to_string())));

    // Retry succeeds once the server recovers.
    Mock::given(method("GET"))
        .and(path("/api/v1/answer/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_json(
            "a1",
            2,
            vec![
                answer_json("r1", 0, vec![], false),
                answer_json("r2", 0, vec![], false),
            ],
            false,
        )))
        .mount(&server)
        .await;

    app.modal = None;
    app.activate_load_more("a1");
    assert_eq!(current_phase(&app), Some(LoadMorePhase::Pending));
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    assert!(app.expansions.is_expanded("a1"));
    assert!(!app.rows().contains(&RowRef::LoadMore("a1".to_string())));
}

#[tokio::test]
async fn test_tombstone_keeps_replies_and_registers_no_actions() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_question(
        &server,
        vec![answer_json(
            "a1",
            1,
            vec![answer_json("a2", 0, vec![], false)],
            true,
        )],
    )
    .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::QuestionDetail {
        id: "q1".to_string(),
    });
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    // The deleted answer still shows its subtree.
    let rows = app.rows();
    assert!(rows.contains(&RowRef::Answer("a1".to_string())));
    assert!(rows.contains(&RowRef::Answer("a2".to_string())));

    // But only its plain view is registered: edit falls back to view.
    let key = ItemKey::answer("a1");
    assert!(!app.views.is_registered(&key, SubView::Edit));
    assert_eq!(app.views.show(&key, SubView::Edit), SubView::View);
    // The live child is fully interactive.
    assert!(app
        .views
        .is_registered(&ItemKey::answer("a2"), SubView::Reply));
}

#[tokio::test]
async fn test_stale_expansion_result_is_dropped() {
    let server = MockServer::start().await;
    mount_auth(&server, false).await;
    mount_question(&server, vec![answer_json("a1", 2, vec![], false)]).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/answer/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_json(
            "a1",
            2,
            vec![answer_json("r1", 0, vec![], false)],
            false,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/todo/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"items": [], "total_items": 0})),
        )
        .mount(&server)
        .await;

    let (mut app, mut rx) = test_app(&server);
    app.navigate(Route::QuestionDetail {
        id: "q1".to_string(),
    });
    let message = next_message(&mut rx).await;
    app.handle_message(message);

    app.activate_load_more("a1");
    // Navigate away before the expansion lands.
    app.navigate(Route::TodoList { page: 1 });

    // Two messages arrive in some order: the todos page and the stale
    // expansion. Both must be handled without effect on the todo page.
    for _ in 0..2 {
        let message = next_message(&mut rx).await;
        app.handle_message(message);
    }

    assert_eq!(app.route, Route::TodoList { page: 1 });
    assert!(app.modal.is_none());
    assert!(!app.expansions.is_expanded("a1"));
}

fn current_phase(app: &qboard::app::App) -> Option<LoadMorePhase> {
    if app.expansions.is_pending("a1") {
        Some(LoadMorePhase::Pending)
    } else if app.expansions.is_failed("a1") {
        Some(LoadMorePhase::Failed)
    } else {
        None
    }
}
