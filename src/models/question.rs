//! Question model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Answer;

/// A question on the Q&A board.
///
/// List endpoints serve it without `answers`; the detail endpoint embeds up
/// to two levels of answers (top-level plus one level of replies each).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    /// Server-assigned identifier
    pub id: String,
    /// Subject line
    pub subject: String,
    /// Body text
    #[serde(default)]
    pub content: String,
    /// Creator identifier as recorded by the server
    #[serde(default)]
    pub creator_ip: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Set once the question has been edited
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Denormalized count of top-level answers
    #[serde(default)]
    pub answer_count: u64,
    /// Embedded top-level answers (detail endpoint only)
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    /// Whether the question has been edited since creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }

    /// Find an answer anywhere in the embedded tree.
    pub fn find_answer(&self, id: &str) -> Option<&Answer> {
        self.answers.iter().find_map(|answer| answer.find(id))
    }

    /// Mutable variant of [`Question::find_answer`].
    pub fn find_answer_mut(&mut self, id: &str) -> Option<&mut Answer> {
        self.answers
            .iter_mut()
            .find_map(|answer| answer.find_mut(id))
    }
}
