//! Messages delivered from spawned network tasks back to the UI loop.
//!
//! Every asynchronous operation ends in exactly one message. Handlers
//! re-resolve their targets against current state when a message arrives —
//! a stale result (the user navigated away mid-flight) must degrade to a
//! no-op, never to a panic.

use crate::error::BoardError;
use crate::models::{Answer, DeletedKind, Page, Question, Todo};
use crate::state::ItemKey;

/// Payload of a finished page fetch.
#[derive(Debug, Clone)]
pub enum PageData {
    /// Todo list page
    Todos(Page<Todo>),
    /// Question list page
    Questions(Page<Question>),
    /// Question detail with its embedded answer tree
    Question(Box<Question>),
    /// Admin screen: three independently fetched buckets
    Admin(AdminBuckets),
    /// Routes without server data (create forms, 404)
    None,
}

/// One soft-deleted bucket as fetched for the admin screen.
///
/// Buckets load and fail independently, so each keeps its own result.
pub type BucketResult<T> = Result<Page<T>, BoardError>;

/// The three admin buckets.
#[derive(Debug, Clone)]
pub struct AdminBuckets {
    pub todos: BucketResult<Todo>,
    pub questions: BucketResult<Question>,
    pub answers: BucketResult<Answer>,
}

/// Replacement payload for one admin bucket after in-page pagination.
#[derive(Debug, Clone)]
pub enum BucketPage {
    Todos(Page<Todo>),
    Questions(Page<Question>),
    Answers(Page<Answer>),
}

/// Which mutating operation a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    CreateTodo,
    UpdateTodo,
    DeleteTodo,
    CreateQuestion,
    UpdateQuestion,
    DeleteQuestion,
    CreateAnswer,
    UpdateAnswer,
    DeleteAnswer,
    AdminSoftDelete,
    AdminHardDelete,
}

impl MutationOp {
    /// Short description used in error acknowledgments.
    pub fn describe(&self) -> &'static str {
        match self {
            MutationOp::CreateTodo => "add the todo",
            MutationOp::UpdateTodo => "update the todo",
            MutationOp::DeleteTodo => "delete the todo",
            MutationOp::CreateQuestion => "post the question",
            MutationOp::UpdateQuestion => "update the question",
            MutationOp::DeleteQuestion => "delete the question",
            MutationOp::CreateAnswer => "post the answer",
            MutationOp::UpdateAnswer => "update the answer",
            MutationOp::DeleteAnswer => "delete the answer",
            MutationOp::AdminSoftDelete => "soft-delete the item",
            MutationOp::AdminHardDelete => "permanently delete the item",
        }
    }
}

/// Messages received from async operations.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A navigation finished: admin flag plus the route's payload.
    /// `seq` identifies the navigation; stale sequences are dropped.
    PageLoaded {
        seq: u64,
        is_admin: bool,
        result: Result<PageData, BoardError>,
    },
    /// One admin bucket was re-fetched after in-page pagination.
    AdminBucketLoaded {
        seq: u64,
        kind: DeletedKind,
        page: u32,
        result: Result<BucketPage, BoardError>,
    },
    /// A lazy-expansion fetch finished.
    RepliesLoaded {
        answer_id: String,
        result: Result<Box<Answer>, BoardError>,
    },
    /// A mutating call succeeded.
    MutationDone { op: MutationOp },
    /// A mutating call failed; the triggering UI stays as it was.
    MutationFailed { op: MutationOp, error: BoardError },
    /// The toggle-session request succeeded.
    ToggleDone { key: ItemKey },
    /// The toggle-session request failed; the session must be aborted.
    ToggleFailed { key: ItemKey, error: BoardError },
}
