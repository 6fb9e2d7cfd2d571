//! Wire models for the board API.
//!
//! All types mirror the JSON shapes served by the backend. Denormalized
//! counts and optionally-embedded child lists are lenient (`#[serde(default)]`)
//! so list endpoints and detail endpoints can share one model.

mod admin;
mod answer;
mod question;
mod todo;

pub use admin::{AuthStatus, DeletedItems, DeletedKind};
pub use answer::Answer;
pub use question::Question;
pub use todo::Todo;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of items per page, shared by every list view.
pub const PAGE_SIZE: u64 = 10;

/// Shape of every paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items in the requested window
    pub items: Vec<T>,
    /// Total item count across all pages
    pub total_items: u64,
}

impl<T> Page<T> {
    /// An empty page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Helper to deserialize a string field the server may send as `null`.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserialize() {
        let json = r#"{"items": [1, 2, 3], "total_items": 25}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total_items, 25);
    }

    #[test]
    fn test_page_empty() {
        let page: Page<u32> = Page::empty();
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
    }
}
