//! Todo item model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A todo item as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    /// Server-assigned identifier
    pub id: String,
    /// Task text
    pub task: String,
    /// Optional due date (date only, no time component)
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Completion flag
    #[serde(default)]
    pub is_completed: bool,
    /// Creator identifier as recorded by the server
    #[serde(default)]
    pub creator_ip: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Set once the item has been edited
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Whether the item has been edited since creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }
}
