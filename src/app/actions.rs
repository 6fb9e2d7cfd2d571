//! Navigation, network actions and message handling.
//!
//! Every user-triggered operation follows the same shape: validate against
//! current state, spawn the network call, and finish when the matching
//! [`AppMessage`] arrives. Handlers re-resolve their targets on arrival and
//! tolerate them being gone — a stale response must be a no-op.

use std::future::Future;

use chrono::NaiveDate;

use crate::error::BoardResult;
use crate::models::{Answer, DeletedKind, PAGE_SIZE};
use crate::state::forms::{
    Form, FormAction, FormField, LABEL_CONTENT, LABEL_DUE_DATE, LABEL_SUBJECT, LABEL_TASK,
};
use crate::state::{ItemForms, ItemKey, SubView, ToggleSession};
use crate::view_state::skip_for;
use crate::view_state::thread::{ANSWER_SUB_VIEWS, TOMBSTONE_SUB_VIEWS};

use super::messages::{AdminBuckets, AppMessage, BucketPage, MutationOp, PageData};
use super::{App, ConfirmAction, Modal, PageState, Route};

/// Sub-views registered for todos and questions (no reply composer).
const ITEM_SUB_VIEWS: [SubView; 3] = [SubView::View, SubView::Edit, SubView::Delete];

impl App {
    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Switch to a route: discard all per-page state, render the loading
    /// placeholder and spawn the fetch chain (admin probe first, then the
    /// route's data).
    pub fn navigate(&mut self, route: Route) {
        self.nav_seq += 1;
        let seq = self.nav_seq;

        self.route = route.clone();
        self.page = PageState::Loading;
        self.views.reset();
        self.forms.clear();
        self.composer = None;
        self.create_form = None;
        self.expansions.reset();
        self.toggle = None;
        self.toggle_pending = false;
        self.pending_mutation = false;
        self.selected = 0;
        self.input_active = false;

        match &route {
            Route::TodoNew => {
                self.create_form = Some(Form::new(
                    FormAction::CreateTodo,
                    "Add todo",
                    vec![
                        FormField::text(LABEL_TASK, ""),
                        FormField::text(LABEL_DUE_DATE, ""),
                        FormField::password(""),
                    ],
                ));
                self.input_active = true;
            }
            Route::QuestionNew => {
                self.create_form = Some(Form::new(
                    FormAction::CreateQuestion,
                    "Post question",
                    vec![
                        FormField::text(LABEL_SUBJECT, ""),
                        FormField::text(LABEL_CONTENT, ""),
                        FormField::password(""),
                    ],
                ));
                self.input_active = true;
            }
            _ => {}
        }

        tracing::debug!(location = %route.location(), seq, "navigating");
        self.spawn_navigation(seq, route);
    }

    /// Re-run the current route's navigation (used after every successful
    /// mutation: the contract is a full reload, not an in-place patch).
    pub fn reload(&mut self) {
        self.navigate(self.route.clone());
    }

    fn spawn_navigation(&self, seq: u64, route: Route) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let admin_pages = self.admin_pages;

        tokio::spawn(async move {
            // Probe first: the admin flag is fixed for the whole render
            // pass. A failed probe means "not admin", never a page error.
            let is_admin = match api.auth_status().await {
                Ok(status) => status.is_admin,
                Err(err) => {
                    tracing::warn!(error = %err, "admin probe failed, assuming non-admin");
                    false
                }
            };

            let result = match &route {
                Route::TodoList { page } => api
                    .list_todos(skip_for(*page, PAGE_SIZE), PAGE_SIZE)
                    .await
                    .map(PageData::Todos),
                Route::QuestionList { page } => api
                    .list_questions(skip_for(*page, PAGE_SIZE), PAGE_SIZE)
                    .await
                    .map(PageData::Questions),
                Route::QuestionDetail { id } => api
                    .get_question(id)
                    .await
                    .map(|question| PageData::Question(Box::new(question))),
                Route::Admin => {
                    // Three bucket fetches, each with its own page window;
                    // they succeed and fail independently.
                    let todos = api
                        .deleted_items(skip_for(admin_pages.todos, PAGE_SIZE), PAGE_SIZE)
                        .await
                        .map(|items| items.todos);
                    let questions = api
                        .deleted_items(skip_for(admin_pages.questions, PAGE_SIZE), PAGE_SIZE)
                        .await
                        .map(|items| items.questions);
                    let answers = api
                        .deleted_items(skip_for(admin_pages.answers, PAGE_SIZE), PAGE_SIZE)
                        .await
                        .map(|items| items.answers);
                    Ok(PageData::Admin(AdminBuckets {
                        todos,
                        questions,
                        answers,
                    }))
                }
                Route::TodoNew | Route::QuestionNew | Route::NotFound => Ok(PageData::None),
            };

            let _ = tx.send(AppMessage::PageLoaded {
                seq,
                is_admin,
                result,
            });
        });
    }

    // ------------------------------------------------------------------
    // Message handling
    // ------------------------------------------------------------------

    /// Apply one message from the network tasks.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::PageLoaded {
                seq,
                is_admin,
                result,
            } => {
                if seq != self.nav_seq {
                    tracing::debug!(seq, current = self.nav_seq, "stale page load dropped");
                    return;
                }
                self.is_admin = is_admin;
                match result {
                    Ok(data) => {
                        self.install_page(&data);
                        self.page = PageState::Ready(data);
                    }
                    Err(err) => {
                        tracing::warn!(code = err.error_code(), error = %err, "page load failed");
                        self.page = PageState::Failed(err.user_message());
                    }
                }
                self.clamp_selection();
            }

            AppMessage::AdminBucketLoaded {
                seq,
                kind,
                page,
                result,
            } => {
                if seq != self.nav_seq {
                    return;
                }
                self.admin_pages.set(kind, page);
                if let PageState::Ready(PageData::Admin(buckets)) = &mut self.page {
                    match result {
                        Ok(BucketPage::Todos(data)) => buckets.todos = Ok(data),
                        Ok(BucketPage::Questions(data)) => buckets.questions = Ok(data),
                        Ok(BucketPage::Answers(data)) => buckets.answers = Ok(data),
                        Err(err) => match kind {
                            DeletedKind::Todos => buckets.todos = Err(err),
                            DeletedKind::Questions => buckets.questions = Err(err),
                            DeletedKind::Answers => buckets.answers = Err(err),
                        },
                    }
                }
                self.clamp_selection();
            }

            AppMessage::RepliesLoaded { answer_id, result } => {
                self.finish_expansion(&answer_id, result);
            }

            AppMessage::MutationDone { op } => {
                self.pending_mutation = false;
                match op {
                    MutationOp::CreateTodo => self.navigate(Route::TodoList { page: 1 }),
                    MutationOp::CreateQuestion | MutationOp::DeleteQuestion => {
                        self.navigate(Route::QuestionList { page: 1 })
                    }
                    MutationOp::AdminSoftDelete => {
                        self.modal = Some(Modal::Info(
                            "Item soft-deleted. It is now only visible on the admin page."
                                .to_string(),
                        ));
                        self.reload();
                    }
                    MutationOp::AdminHardDelete => {
                        self.modal = Some(Modal::Info("Item permanently deleted.".to_string()));
                        self.reload();
                    }
                    _ => self.reload(),
                }
            }

            AppMessage::MutationFailed { op, error } => {
                self.pending_mutation = false;
                tracing::warn!(code = error.error_code(), error = %error, "mutation failed");
                self.modal = Some(Modal::Error(format!(
                    "Failed to {}: {}",
                    op.describe(),
                    error.user_message()
                )));
            }

            AppMessage::ToggleDone { key } => {
                self.toggle_pending = false;
                if let Some(session) = self.toggle.take() {
                    if session.key == key {
                        session.commit();
                    } else {
                        self.toggle = Some(session);
                    }
                }
                // The reload discards the borrowed form with the page.
                self.reload();
            }

            AppMessage::ToggleFailed { key, error } => {
                self.toggle_pending = false;
                tracing::warn!(code = error.error_code(), error = %error, "toggle failed");
                self.modal = Some(Modal::Error(format!(
                    "Failed to change status: {}",
                    error.user_message()
                )));
                match self.toggle.take() {
                    Some(session) if session.key == key => {
                        let form = self
                            .forms
                            .get_mut(&key)
                            .and_then(|forms| forms.form_mut(SubView::Delete));
                        session.abort(&mut self.views, form);
                        self.input_active = false;
                    }
                    other => self.toggle = other,
                }
            }
        }
    }

    /// Wire a freshly fetched page into the controller and form stores.
    fn install_page(&mut self, data: &PageData) {
        match data {
            PageData::Todos(page) => {
                for todo in &page.items {
                    let key = ItemKey::todo(todo.id.clone());
                    self.views.register(key.clone(), &ITEM_SUB_VIEWS);
                    self.forms.insert(key, ItemForms::for_todo(todo));
                }
            }
            PageData::Question(question) => {
                let key = ItemKey::question(question.id.clone());
                self.views.register(key.clone(), &ITEM_SUB_VIEWS);
                self.forms.insert(key, ItemForms::for_question(question));
                self.register_answers(&question.answers);
                self.composer = Some(Form::new(
                    FormAction::CreateAnswer {
                        question_id: question.id.clone(),
                        parent_id: None,
                    },
                    "Post answer",
                    vec![
                        FormField::text(LABEL_CONTENT, ""),
                        FormField::password(""),
                    ],
                ));
            }
            // Question-list rows are links; admin rows have no sub-views.
            PageData::Questions(_) | PageData::Admin(_) | PageData::None => {}
        }
    }

    /// Register any unseen answer nodes. Safe to call again after an
    /// expansion: already-known items keep their sub-view and form state.
    fn register_answers(&mut self, answers: &[Answer]) {
        for answer in answers {
            let key = ItemKey::answer(answer.id.clone());
            if !self.views.is_known(&key) {
                if answer.is_deleted() {
                    self.views.register(key, &TOMBSTONE_SUB_VIEWS);
                } else {
                    self.views.register(key.clone(), &ANSWER_SUB_VIEWS);
                    self.forms.insert(key, ItemForms::for_answer(answer));
                }
            }
            self.register_answers(&answer.replies);
        }
    }

    // ------------------------------------------------------------------
    // Lazy expansion
    // ------------------------------------------------------------------

    /// Activate a load-more control. No-op while its fetch is pending.
    pub fn activate_load_more(&mut self, answer_id: &str) {
        if self.expansions.is_pending(answer_id) {
            return;
        }
        self.expansions.mark_pending(answer_id);

        let api = self.api.clone();
        let tx = self.tx.clone();
        let id = answer_id.to_string();
        tokio::spawn(async move {
            let result = api.get_answer(&id).await.map(Box::new);
            let _ = tx.send(AppMessage::RepliesLoaded {
                answer_id: id,
                result,
            });
        });
    }

    fn finish_expansion(&mut self, answer_id: &str, result: BoardResult<Box<Answer>>) {
        match result {
            Ok(fetched) => {
                let replaced = match &mut self.page {
                    PageState::Ready(PageData::Question(question)) => {
                        match question.find_answer_mut(answer_id) {
                            Some(target) => {
                                // Idempotent refresh: replace, never append.
                                target.replies = fetched.replies.clone();
                                true
                            }
                            None => false,
                        }
                    }
                    _ => false,
                };
                if replaced {
                    self.expansions.resolve_success(answer_id);
                    self.register_answers(&fetched.replies);
                    self.clamp_selection();
                } else {
                    // Navigated away mid-fetch; nothing to touch.
                    tracing::debug!(answer_id, "expansion result for absent node dropped");
                }
            }
            Err(err) => {
                let on_screen = self
                    .current_question()
                    .is_some_and(|question| question.find_answer(answer_id).is_some());
                if on_screen {
                    self.expansions.resolve_failure(answer_id);
                    self.modal = Some(Modal::Error(format!(
                        "Failed to load replies: {}",
                        err.user_message()
                    )));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Toggle session
    // ------------------------------------------------------------------

    /// Flip a todo's completion checkbox: begin a toggle session borrowing
    /// the item's delete form.
    pub fn begin_toggle(&mut self, todo_id: &str) {
        if self.toggle.is_some() {
            // The checkbox is disabled while a session is live; reaching
            // this is a caller error, not an expected path.
            tracing::error!(todo_id, "toggle session already active");
            return;
        }
        let Some(todo) = self.current_todo(todo_id) else {
            return;
        };
        let prior = todo.is_completed;
        let key = ItemKey::todo(todo_id.to_string());
        let Some(forms) = self.forms.get_mut(&key) else {
            tracing::warn!(%key, "toggle requested for item without a delete form");
            return;
        };
        match ToggleSession::begin(key, prior, &mut self.views, &mut forms.delete) {
            Ok(session) => {
                self.toggle = Some(session);
                self.input_active = true;
            }
            Err(err) => tracing::warn!(error = %err, "toggle session refused"),
        }
    }

    // ------------------------------------------------------------------
    // Form submission
    // ------------------------------------------------------------------

    /// Submit the inline form currently open on `key`.
    pub fn submit_item_form(&mut self, key: ItemKey, mode: SubView) {
        let Some(form) = self
            .forms
            .get(&key)
            .and_then(|forms| forms.form(mode))
            .cloned()
        else {
            tracing::warn!(%key, %mode, "submit with no backing form");
            return;
        };
        self.submit_form(form);
    }

    /// Submit the full-page create form.
    pub fn submit_create_form(&mut self) {
        if let Some(form) = self.create_form.clone() {
            self.submit_form(form);
        }
    }

    /// Submit the answer composer.
    pub fn submit_composer(&mut self) {
        if let Some(form) = self.composer.clone() {
            self.submit_form(form);
        }
    }

    /// Validate and dispatch a form on its submit binding.
    fn submit_form(&mut self, form: Form) {
        if self.pending_mutation {
            return;
        }
        let password = form.password().to_string();
        if password.is_empty() {
            self.show_error("Password is required.");
            return;
        }

        let api = self.api.clone();
        match form.action.clone() {
            FormAction::CreateTodo => {
                let task = form.value(LABEL_TASK).to_string();
                if task.is_empty() {
                    self.show_error("Task text is required.");
                    return;
                }
                let due = match parse_due_date(form.value(LABEL_DUE_DATE)) {
                    Ok(due) => due,
                    Err(msg) => return self.show_error(msg),
                };
                self.spawn_mutation(MutationOp::CreateTodo, async move {
                    api.create_todo(&task, due, &password).await
                });
            }
            FormAction::UpdateTodo { id } => {
                let task = form.value(LABEL_TASK).to_string();
                if task.is_empty() {
                    self.show_error("Task text is required.");
                    return;
                }
                let due = match parse_due_date(form.value(LABEL_DUE_DATE)) {
                    Ok(due) => due,
                    Err(msg) => return self.show_error(msg),
                };
                self.spawn_mutation(MutationOp::UpdateTodo, async move {
                    api.update_todo(&id, &task, due, &password).await
                });
            }
            FormAction::DeleteTodo { id } => {
                self.spawn_mutation(MutationOp::DeleteTodo, async move {
                    api.delete_todo(&id, &password).await
                });
            }
            FormAction::ToggleTodo { id, desired } => {
                // The submitting control is disabled while the request is
                // pending; a second submit is silently ignored.
                if self.toggle_pending {
                    return;
                }
                self.toggle_pending = true;
                let tx = self.tx.clone();
                let key = ItemKey::todo(id.clone());
                tokio::spawn(async move {
                    let message = match api.set_todo_completed(&id, desired, &password).await {
                        Ok(()) => AppMessage::ToggleDone { key },
                        Err(error) => AppMessage::ToggleFailed { key, error },
                    };
                    let _ = tx.send(message);
                });
            }
            FormAction::CreateQuestion => {
                let subject = form.value(LABEL_SUBJECT).to_string();
                let content = form.value(LABEL_CONTENT).to_string();
                if subject.is_empty() || content.is_empty() {
                    self.show_error("Subject and content are required.");
                    return;
                }
                self.spawn_mutation(MutationOp::CreateQuestion, async move {
                    api.create_question(&subject, &content, &password).await
                });
            }
            FormAction::UpdateQuestion { id } => {
                let subject = form.value(LABEL_SUBJECT).to_string();
                let content = form.value(LABEL_CONTENT).to_string();
                if subject.is_empty() || content.is_empty() {
                    self.show_error("Subject and content are required.");
                    return;
                }
                self.spawn_mutation(MutationOp::UpdateQuestion, async move {
                    api.update_question(&id, &subject, &content, &password).await
                });
            }
            FormAction::DeleteQuestion { id } => {
                self.modal = Some(Modal::Confirm {
                    message: "Delete this question? This cannot be undone.".to_string(),
                    action: ConfirmAction::DeleteQuestion { id, password },
                });
            }
            FormAction::CreateAnswer {
                question_id,
                parent_id,
            } => {
                let content = form.value(LABEL_CONTENT).to_string();
                if content.is_empty() {
                    self.show_error("Content and password are required.");
                    return;
                }
                self.spawn_mutation(MutationOp::CreateAnswer, async move {
                    api.create_answer(&question_id, parent_id.as_deref(), &content, &password)
                        .await
                });
            }
            FormAction::UpdateAnswer { id } => {
                let content = form.value(LABEL_CONTENT).to_string();
                if content.is_empty() {
                    self.show_error("Content is required.");
                    return;
                }
                self.spawn_mutation(MutationOp::UpdateAnswer, async move {
                    api.update_answer(&id, &content, &password).await
                });
            }
            FormAction::DeleteAnswer { id } => {
                self.modal = Some(Modal::Confirm {
                    message: "Delete this answer? This cannot be undone.".to_string(),
                    action: ConfirmAction::DeleteAnswer { id, password },
                });
            }
        }
    }

    /// Close an inline form, restoring toggle-session bindings when the
    /// delete form was borrowed.
    pub fn cancel_item_form(&mut self, key: ItemKey, mode: SubView) {
        if mode == SubView::Delete {
            if let Some(session) = self.toggle.take() {
                if session.key == key {
                    if self.toggle_pending {
                        // The control is disabled for the duration of the
                        // request; put the session back.
                        self.toggle = Some(session);
                        return;
                    }
                    let form = self
                        .forms
                        .get_mut(&key)
                        .and_then(|forms| forms.form_mut(SubView::Delete));
                    session.abort(&mut self.views, form);
                    self.input_active = false;
                    return;
                }
                self.toggle = Some(session);
            }
        }
        if mode == SubView::Reply {
            // Closing the reply composer discards the draft, like tearing
            // down the form node.
            if let Some(form) = self
                .forms
                .get_mut(&key)
                .and_then(|forms| forms.reply.as_mut())
            {
                for field in &mut form.fields {
                    field.value.clear();
                }
                form.focus = 0;
            }
        }
        self.views.show(&key, SubView::View);
        self.input_active = false;
    }

    // ------------------------------------------------------------------
    // Admin actions
    // ------------------------------------------------------------------

    /// Ask for confirmation before an admin soft delete.
    pub fn request_admin_soft_delete(&mut self, kind: DeletedKind, id: &str) {
        self.modal = Some(Modal::Confirm {
            message: format!(
                "Soft-delete this {} (id {})? It disappears for users and can be restored or \
                 purged from the admin page.",
                kind_singular(kind),
                id
            ),
            action: ConfirmAction::AdminSoftDelete {
                kind,
                id: id.to_string(),
            },
        });
    }

    /// Ask for confirmation before a hard delete.
    pub fn request_admin_hard_delete(&mut self, kind: DeletedKind, id: &str) {
        self.modal = Some(Modal::Confirm {
            message: format!(
                "Permanently delete this {} (id {})? This cannot be undone.",
                kind_singular(kind),
                id
            ),
            action: ConfirmAction::AdminHardDelete {
                kind,
                id: id.to_string(),
            },
        });
    }

    /// Run a confirmed action.
    pub fn run_confirmed(&mut self, action: ConfirmAction) {
        let api = self.api.clone();
        match action {
            ConfirmAction::DeleteQuestion { id, password } => {
                self.spawn_mutation(MutationOp::DeleteQuestion, async move {
                    api.delete_question(&id, &password).await
                });
            }
            ConfirmAction::DeleteAnswer { id, password } => {
                self.spawn_mutation(MutationOp::DeleteAnswer, async move {
                    api.delete_answer(&id, &password).await
                });
            }
            ConfirmAction::AdminSoftDelete { kind, id } => {
                self.spawn_mutation(MutationOp::AdminSoftDelete, async move {
                    api.admin_soft_delete(kind, &id).await
                });
            }
            ConfirmAction::AdminHardDelete { kind, id } => {
                self.spawn_mutation(MutationOp::AdminHardDelete, async move {
                    api.admin_hard_delete(kind, &id).await
                });
            }
        }
    }

    /// Jump one admin bucket to `page` without changing routes; the result
    /// replaces that bucket only.
    pub fn change_bucket_page(&mut self, kind: DeletedKind, page: u32) {
        self.admin_pages.set(kind, page);
        let seq = self.nav_seq;
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .deleted_items(skip_for(page, PAGE_SIZE), PAGE_SIZE)
                .await
                .map(|items| match kind {
                    DeletedKind::Todos => BucketPage::Todos(items.todos),
                    DeletedKind::Questions => BucketPage::Questions(items.questions),
                    DeletedKind::Answers => BucketPage::Answers(items.answers),
                });
            let _ = tx.send(AppMessage::AdminBucketLoaded {
                seq,
                kind,
                page,
                result,
            });
        });
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Surface a blocking error acknowledgment.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.modal = Some(Modal::Error(message.into()));
    }

    fn spawn_mutation<F>(&mut self, op: MutationOp, fut: F)
    where
        F: Future<Output = BoardResult<()>> + Send + 'static,
    {
        self.pending_mutation = true;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let message = match fut.await {
                Ok(()) => AppMessage::MutationDone { op },
                Err(error) => AppMessage::MutationFailed { op, error },
            };
            let _ = tx.send(message);
        });
    }
}

fn kind_singular(kind: DeletedKind) -> &'static str {
    match kind {
        DeletedKind::Todos => "todo",
        DeletedKind::Questions => "question",
        DeletedKind::Answers => "answer",
    }
}

/// Parse the optional due-date field. Empty means no due date.
fn parse_due_date(value: &str) -> Result<Option<NaiveDate>, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| "Due date must look like 2026-01-31.")
}
