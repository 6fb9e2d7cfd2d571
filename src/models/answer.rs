//! Answer model, including the threaded-reply shape.
//!
//! Answers form a tree: `parent_id == None` marks a top-level answer on a
//! question, and each answer may embed one eagerly-delivered level of
//! `replies`. `reply_count` is authoritative even when `replies` is shorter;
//! the difference is the lazy-expansion boundary, not an inconsistency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserialize_nullable_string;

/// An answer or nested reply on a question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// Server-assigned identifier
    pub id: String,
    /// The question this answer belongs to
    pub question_id: String,
    /// Parent answer id; `None` means top-level
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Body text (empty for soft-deleted answers)
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    /// Creator identifier as recorded by the server
    #[serde(default)]
    pub creator_ip: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Set once the answer has been edited
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft-delete marker; a set value means "tombstone", not "absent"
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Total number of direct replies, whether or not they are embedded
    #[serde(default)]
    pub reply_count: u64,
    /// Eagerly-delivered direct replies (at most one level below this node)
    #[serde(default)]
    pub replies: Vec<Answer>,
}

impl Answer {
    /// Whether this answer has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether the answer has been edited since creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }

    /// Direct replies that exist on the server but were not delivered with
    /// this node. A positive value marks the lazy-expansion boundary.
    pub fn hidden_reply_count(&self) -> u64 {
        self.reply_count.saturating_sub(self.replies.len() as u64)
    }

    /// Find an answer by id in this subtree (including self).
    pub fn find(&self, id: &str) -> Option<&Answer> {
        if self.id == id {
            return Some(self);
        }
        self.replies.iter().find_map(|reply| reply.find(id))
    }

    /// Mutable variant of [`Answer::find`].
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Answer> {
        if self.id == id {
            return Some(self);
        }
        self.replies.iter_mut().find_map(|reply| reply.find_mut(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_json(id: &str, replies: &str, reply_count: u64) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "question_id": "q1",
                "parent_id": null,
                "content": "body of {id}",
                "creator_ip": "10.0.0.1",
                "created_at": "2026-02-01T12:00:00Z",
                "reply_count": {reply_count},
                "replies": [{replies}]
            }}"#
        )
    }

    #[test]
    fn test_deserialize_nested() {
        let inner = answer_json("a2", "", 0);
        let outer = answer_json("a1", &inner, 3);
        let answer: Answer = serde_json::from_str(&outer).unwrap();
        assert_eq!(answer.id, "a1");
        assert_eq!(answer.replies.len(), 1);
        assert_eq!(answer.replies[0].id, "a2");
        assert_eq!(answer.hidden_reply_count(), 2);
    }

    #[test]
    fn test_tombstone_with_null_content() {
        let json = r#"{
            "id": "a9",
            "question_id": "q1",
            "content": null,
            "created_at": "2026-02-01T12:00:00Z",
            "deleted_at": "2026-02-02T12:00:00Z",
            "reply_count": 1
        }"#;
        let answer: Answer = serde_json::from_str(json).unwrap();
        assert!(answer.is_deleted());
        assert_eq!(answer.content, "");
        assert_eq!(answer.hidden_reply_count(), 1);
    }

    #[test]
    fn test_hidden_reply_count_never_underflows() {
        // A server that embeds more replies than it counts must not panic us.
        let inner = answer_json("a2", "", 0);
        let outer = answer_json("a1", &inner, 0);
        let answer: Answer = serde_json::from_str(&outer).unwrap();
        assert_eq!(answer.hidden_reply_count(), 0);
    }

    #[test]
    fn test_find_in_subtree() {
        let inner = answer_json("a3", "", 0);
        let mid = answer_json("a2", &inner, 1);
        let outer = answer_json("a1", &mid, 1);
        let mut answer: Answer = serde_json::from_str(&outer).unwrap();

        assert!(answer.find("a1").is_some());
        assert_eq!(answer.find("a3").unwrap().content, "body of a3");
        assert!(answer.find("zz").is_none());

        answer.find_mut("a3").unwrap().content = "edited".to_string();
        assert_eq!(answer.find("a3").unwrap().content, "edited");
    }
}
