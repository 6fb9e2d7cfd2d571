//! Rendering-contract violations.
//!
//! A [`StateError`] means the per-item view machinery was asked to do
//! something its render tree cannot back — most commonly revealing a
//! sub-view that was never registered. It is logged and self-healed by
//! falling back to the item's plain view; it must never surface as a
//! user-facing failure.

use std::fmt;

/// A rendering-contract violation on one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateError {
    /// The item the request targeted (e.g. `answer:42`)
    pub item: String,
    /// What went wrong
    pub problem: String,
}

impl StateError {
    /// A sub-view was requested that was never registered for the item.
    pub fn missing_sub_view(item: impl fmt::Display, requested: impl fmt::Display) -> Self {
        Self {
            item: item.to_string(),
            problem: format!("sub-view '{requested}' not registered"),
        }
    }

    /// A precondition of an item-level operation did not hold.
    pub fn precondition(item: impl fmt::Display, problem: impl fmt::Display) -> Self {
        Self {
            item: item.to_string(),
            problem: problem.to_string(),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item '{}': {}", self.item, self.problem)
    }
}

impl std::error::Error for StateError {}
