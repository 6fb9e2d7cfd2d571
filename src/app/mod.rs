//! Application state and orchestration.
//!
//! `App` owns everything the render pass reads: the current route, the
//! fetched page payload, per-item sub-view state and forms, the optional
//! toggle session, expansion bookkeeping, selection, and modal dialogs.
//! Network work is spawned onto tokio and reports back through
//! [`AppMessage`]; `App` itself is only ever touched from the UI loop.

mod actions;
mod handlers;
mod messages;
mod navigation;

pub use messages::{AdminBuckets, AppMessage, BucketPage, MutationOp, PageData};
pub use navigation::{NavSection, Route};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::adapters::ReqwestHttpClient;
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{DeletedKind, Question, Todo, PAGE_SIZE};
use crate::state::{Form, FormStore, ItemKey, SubView, ToggleSession, ViewStates};
use crate::view_state::{
    answer_tree, flatten, page_nav, ExpansionState, PageNav, RenderContext, ThreadRow,
};

/// The production API client type.
pub type Api = ApiClient<ReqwestHttpClient>;

/// Lifecycle of the current page's payload.
#[derive(Debug, Clone)]
pub enum PageState {
    /// Fetch in flight; a loading placeholder renders
    Loading,
    /// The list fetch failed; an inline error block renders instead
    Failed(String),
    /// Payload available
    Ready(PageData),
}

/// A blocking dialog, rendered over the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Error acknowledgment; dismissing leaves the page as it was
    Error(String),
    /// Informational acknowledgment
    Info(String),
    /// Yes/no gate in front of a destructive action
    Confirm {
        message: String,
        action: ConfirmAction,
    },
}

/// Destructive actions that require confirmation first.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    DeleteQuestion { id: String, password: String },
    DeleteAnswer { id: String, password: String },
    AdminSoftDelete { kind: DeletedKind, id: String },
    AdminHardDelete { kind: DeletedKind, id: String },
}

/// Per-bucket current pages of the admin screen.
///
/// Admin pagination is state-driven (no route change), so these survive
/// bucket reloads and navigations alike.
#[derive(Debug, Clone, Copy)]
pub struct AdminPages {
    pub todos: u32,
    pub questions: u32,
    pub answers: u32,
}

impl Default for AdminPages {
    fn default() -> Self {
        Self {
            todos: 1,
            questions: 1,
            answers: 1,
        }
    }
}

impl AdminPages {
    pub fn get(&self, kind: DeletedKind) -> u32 {
        match kind {
            DeletedKind::Todos => self.todos,
            DeletedKind::Questions => self.questions,
            DeletedKind::Answers => self.answers,
        }
    }

    pub fn set(&mut self, kind: DeletedKind, page: u32) {
        match kind {
            DeletedKind::Todos => self.todos = page,
            DeletedKind::Questions => self.questions = page,
            DeletedKind::Answers => self.answers = page,
        }
    }
}

/// One selectable row of the current page, in display order.
///
/// Rows are re-derived from the page payload on demand; they carry only
/// stable identities so a key press can be dispatched after any reload.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRef {
    /// "New todo" / "New question" affordance at the top of a list
    NewItemLink,
    /// A todo row
    Todo(String),
    /// A question-list row; activating it opens the detail page
    QuestionLink(String),
    /// The question block on the detail page
    QuestionBody(String),
    /// An answer node in the thread
    Answer(String),
    /// A load-more control under the answer with this id
    LoadMore(String),
    /// The answer composer at the bottom of the detail page
    Composer,
    /// The pagination strip of a URL-driven list
    PageNav,
    /// A soft-deleted item on the admin screen
    AdminItem { kind: DeletedKind, id: String },
    /// The pagination strip of one admin bucket
    AdminPageNav(DeletedKind),
}

/// Top-level application state.
pub struct App {
    pub(crate) api: Arc<Api>,
    pub(crate) tx: mpsc::UnboundedSender<AppMessage>,

    /// Where we are
    pub route: Route,
    /// Monotonic navigation counter; stale page loads are dropped
    pub(crate) nav_seq: u64,
    /// Admin visibility for the current render pass (fixed per navigation)
    pub is_admin: bool,
    /// The current page's payload
    pub page: PageState,
    /// Admin bucket pages (state-driven pagination)
    pub admin_pages: AdminPages,

    /// Per-item sub-view machine
    pub views: ViewStates,
    /// Per-item inline forms
    pub forms: FormStore,
    /// Full-page create form (TodoNew / QuestionNew)
    pub create_form: Option<Form>,
    /// Answer composer on the detail page
    pub composer: Option<Form>,
    /// Live toggle session, at most one
    pub toggle: Option<ToggleSession>,
    /// Lazy-expansion bookkeeping for the current page
    pub expansions: ExpansionState,

    /// Index into [`App::rows`]
    pub selected: usize,
    /// Whether keystrokes are captured by the active form
    pub input_active: bool,
    /// Blocking dialog, if any
    pub modal: Option<Modal>,
    /// A mutating request is in flight
    pub pending_mutation: bool,
    /// The toggle-session request is in flight (its control is disabled)
    pub toggle_pending: bool,

    pub should_quit: bool,
}

impl App {
    /// Create the app and the receiving end of its message channel.
    pub fn new(config: &Config) -> (Self, mpsc::UnboundedReceiver<AppMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let api = Arc::new(ApiClient::new(
            ReqwestHttpClient::new(),
            config.api_base_url.clone(),
        ));
        let app = Self {
            api,
            tx,
            route: Route::TodoList { page: 1 },
            nav_seq: 0,
            is_admin: false,
            page: PageState::Loading,
            admin_pages: AdminPages::default(),
            views: ViewStates::new(),
            forms: FormStore::new(),
            create_form: None,
            composer: None,
            toggle: None,
            expansions: ExpansionState::new(),
            selected: 0,
            input_active: false,
            modal: None,
            pending_mutation: false,
            toggle_pending: false,
            should_quit: false,
        };
        (app, rx)
    }

    /// The question on the current detail page, if that is where we are.
    pub fn current_question(&self) -> Option<&Question> {
        match &self.page {
            PageState::Ready(PageData::Question(question)) => Some(question),
            _ => None,
        }
    }

    /// Find a todo in the current list page.
    pub fn current_todo(&self, id: &str) -> Option<&Todo> {
        match &self.page {
            PageState::Ready(PageData::Todos(page)) => {
                page.items.iter().find(|todo| todo.id == id)
            }
            _ => None,
        }
    }

    /// The checkbox value to render for a todo, honoring a live toggle
    /// session's optimistic flip.
    pub fn todo_checked(&self, todo: &Todo) -> bool {
        let key = ItemKey::todo(todo.id.clone());
        self.toggle
            .as_ref()
            .and_then(|session| session.checkbox_override(&key))
            .unwrap_or(todo.is_completed)
    }

    /// Pagination model for the todo list.
    pub fn todo_nav(&self) -> Option<PageNav<Route>> {
        match (&self.route, &self.page) {
            (Route::TodoList { page }, PageState::Ready(PageData::Todos(data))) => {
                page_nav(*page, PAGE_SIZE, data.total_items, |target| Route::TodoList {
                    page: target,
                })
            }
            _ => None,
        }
    }

    /// Pagination model for the question list.
    pub fn question_nav(&self) -> Option<PageNav<Route>> {
        match (&self.route, &self.page) {
            (Route::QuestionList { page }, PageState::Ready(PageData::Questions(data))) => {
                page_nav(*page, PAGE_SIZE, data.total_items, |target| {
                    Route::QuestionList { page: target }
                })
            }
            _ => None,
        }
    }

    /// Pagination model for one admin bucket. Links are plain target pages
    /// (no route change).
    pub fn bucket_nav(&self, kind: DeletedKind) -> Option<PageNav<u32>> {
        let buckets = match &self.page {
            PageState::Ready(PageData::Admin(buckets)) => buckets,
            _ => return None,
        };
        let total_items = match kind {
            DeletedKind::Todos => buckets.todos.as_ref().ok()?.total_items,
            DeletedKind::Questions => buckets.questions.as_ref().ok()?.total_items,
            DeletedKind::Answers => buckets.answers.as_ref().ok()?.total_items,
        };
        page_nav(self.admin_pages.get(kind), PAGE_SIZE, total_items, |page| page)
    }

    /// The selectable rows of the current page, in display order.
    pub fn rows(&self) -> Vec<RowRef> {
        let mut rows = Vec::new();
        match (&self.route, &self.page) {
            (Route::TodoList { .. }, PageState::Ready(PageData::Todos(page))) => {
                rows.push(RowRef::NewItemLink);
                for todo in &page.items {
                    rows.push(RowRef::Todo(todo.id.clone()));
                }
                if self.todo_nav().is_some() {
                    rows.push(RowRef::PageNav);
                }
            }
            (Route::QuestionList { .. }, PageState::Ready(PageData::Questions(page))) => {
                rows.push(RowRef::NewItemLink);
                for question in &page.items {
                    rows.push(RowRef::QuestionLink(question.id.clone()));
                }
                if self.question_nav().is_some() {
                    rows.push(RowRef::PageNav);
                }
            }
            (Route::QuestionDetail { .. }, PageState::Ready(PageData::Question(question))) => {
                rows.push(RowRef::QuestionBody(question.id.clone()));
                let ctx = RenderContext {
                    is_admin: self.is_admin,
                    expansions: &self.expansions,
                };
                let tree = answer_tree(&question.answers, &ctx);
                for row in flatten(&tree) {
                    match row {
                        ThreadRow::Answer(node) => {
                            rows.push(RowRef::Answer(node.key.id.clone()));
                        }
                        ThreadRow::LoadMore(node, _) => {
                            rows.push(RowRef::LoadMore(node.key.id.clone()));
                        }
                    }
                }
                rows.push(RowRef::Composer);
            }
            (Route::Admin, PageState::Ready(PageData::Admin(buckets))) => {
                if let Ok(page) = &buckets.todos {
                    for item in &page.items {
                        rows.push(RowRef::AdminItem {
                            kind: DeletedKind::Todos,
                            id: item.id.clone(),
                        });
                    }
                }
                if self.bucket_nav(DeletedKind::Todos).is_some() {
                    rows.push(RowRef::AdminPageNav(DeletedKind::Todos));
                }
                if let Ok(page) = &buckets.questions {
                    for item in &page.items {
                        rows.push(RowRef::AdminItem {
                            kind: DeletedKind::Questions,
                            id: item.id.clone(),
                        });
                    }
                }
                if self.bucket_nav(DeletedKind::Questions).is_some() {
                    rows.push(RowRef::AdminPageNav(DeletedKind::Questions));
                }
                if let Ok(page) = &buckets.answers {
                    for item in &page.items {
                        rows.push(RowRef::AdminItem {
                            kind: DeletedKind::Answers,
                            id: item.id.clone(),
                        });
                    }
                }
                if self.bucket_nav(DeletedKind::Answers).is_some() {
                    rows.push(RowRef::AdminPageNav(DeletedKind::Answers));
                }
            }
            _ => {}
        }
        rows
    }

    /// The currently selected row, if any.
    pub fn selected_row(&self) -> Option<RowRef> {
        self.rows().into_iter().nth(self.selected)
    }

    /// Keep the selection inside the row list after a reload.
    pub(crate) fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// The item key of the selected row, when the row is an item with
    /// sub-views.
    pub fn selected_item_key(&self) -> Option<ItemKey> {
        match self.selected_row()? {
            RowRef::Todo(id) => Some(ItemKey::todo(id)),
            RowRef::QuestionBody(id) => Some(ItemKey::question(id)),
            RowRef::Answer(id) => Some(ItemKey::answer(id)),
            _ => None,
        }
    }

    /// Whether the selected item currently shows an inline form.
    pub fn selected_form_mode(&self) -> Option<(ItemKey, SubView)> {
        let key = self.selected_item_key()?;
        let mode = self.views.mode(&key);
        (mode != SubView::View).then_some((key, mode))
    }
}
