//! Admin-only models: the soft-deleted item buckets and the status probe.

use serde::{Deserialize, Serialize};

use super::{Answer, Page, Question, Todo};

/// Response of the admin status probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthStatus {
    /// Whether the caller is allowed to use admin operations
    #[serde(default)]
    pub is_admin: bool,
}

/// The three entity buckets the admin deleted-items endpoint returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeletedKind {
    Todos,
    Questions,
    Answers,
}

impl DeletedKind {
    /// Path segment used by the admin endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletedKind::Todos => "todos",
            DeletedKind::Questions => "questions",
            DeletedKind::Answers => "answers",
        }
    }

    /// All buckets, in display order.
    pub fn all() -> [DeletedKind; 3] {
        [
            DeletedKind::Todos,
            DeletedKind::Questions,
            DeletedKind::Answers,
        ]
    }
}

impl std::fmt::Display for DeletedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of each soft-deleted bucket, as served by
/// `GET /admin/deleted-items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeletedItems {
    /// Soft-deleted todos
    #[serde(default)]
    pub todos: Page<Todo>,
    /// Soft-deleted questions
    #[serde(default)]
    pub questions: Page<Question>,
    /// Soft-deleted answers
    #[serde(default)]
    pub answers: Page<Answer>,
}
