//! Pure view-state builders.
//!
//! These modules turn server models into immutable render descriptions the
//! ui layer draws from, keeping tree construction and pagination math
//! independent of ratatui and therefore unit-testable.

pub mod pagination;
pub mod thread;

pub use pagination::{page_nav, skip_for, PageEntry, PageNav};
pub use thread::{
    answer_node, answer_tree, flatten, AnswerBody, AnswerNode, ExpansionState, LoadMoreControl,
    LoadMorePhase, ThreadRow,
};

/// Read-only context threaded through every rendering function.
///
/// The admin flag is computed once per navigation and carried here rather
/// than read from shared state, so it cannot change mid-render.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Whether admin affordances are rendered this pass
    pub is_admin: bool,
    /// Lazy-expansion bookkeeping for the current page
    pub expansions: &'a ExpansionState,
}
