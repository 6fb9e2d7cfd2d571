//! Per-item sub-view state machine.
//!
//! Every rendered list item (todo, question, answer) shows exactly one of
//! its sub-views at a time: the plain view, the inline edit form, the
//! inline delete form, or (answers only) the inline reply composer.
//! [`ViewStates`] tracks which sub-view is current per item and which
//! sub-views were registered when the item's node was built. Requesting an
//! unregistered sub-view is a rendering-contract violation: it is logged
//! and healed by falling back to the plain view, never by leaving the item
//! with nothing visible.

use std::collections::HashMap;
use std::fmt;

use crate::error::StateError;

/// The kinds of list items the controller serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Todo,
    Question,
    Answer,
}

impl EntityKind {
    /// Lowercase name, used in item keys and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Todo => "todo",
            EntityKind::Question => "question",
            EntityKind::Answer => "answer",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of a rendered item: entity kind plus server id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub kind: EntityKind,
    pub id: String,
}

impl ItemKey {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn todo(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Todo, id)
    }

    pub fn question(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Question, id)
    }

    pub fn answer(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Answer, id)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// The mutually exclusive presentation modes of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubView {
    /// Read-only presentation
    #[default]
    View,
    /// Inline edit form
    Edit,
    /// Inline delete confirmation (password prompt)
    Delete,
    /// Inline reply composer (answers only)
    Reply,
}

impl SubView {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubView::View => "view",
            SubView::Edit => "edit",
            SubView::Delete => "delete",
            SubView::Reply => "reply",
        }
    }
}

impl fmt::Display for SubView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a sub-view lays out inside its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubViewLayout {
    /// Single horizontal line (checkbox, text and actions side by side)
    Row,
    /// Stacked block (multi-line content or form)
    Block,
}

/// Layout table: (entity kind, sub-view) -> layout.
///
/// One table instead of per-call-site switches, because the same controller
/// serves three entity kinds with two different default layouts.
pub fn layout(kind: EntityKind, mode: SubView) -> SubViewLayout {
    match (kind, mode) {
        (EntityKind::Todo, SubView::View) => SubViewLayout::Row,
        (EntityKind::Question, SubView::View) => SubViewLayout::Block,
        (EntityKind::Answer, SubView::View) => SubViewLayout::Block,
        (_, SubView::Edit) => SubViewLayout::Block,
        (_, SubView::Delete) => SubViewLayout::Row,
        (_, SubView::Reply) => SubViewLayout::Block,
    }
}

/// Sub-view state for every item on the current page.
///
/// Entries are created when a page's nodes are built and discarded on the
/// next full re-render; the state is never persisted.
#[derive(Debug, Default)]
pub struct ViewStates {
    current: HashMap<ItemKey, SubView>,
    registered: HashMap<ItemKey, Vec<SubView>>,
}

impl ViewStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all per-item state. Called when a page re-renders from the
    /// server and the old nodes are discarded.
    pub fn reset(&mut self) {
        self.current.clear();
        self.registered.clear();
    }

    /// Register the sub-views that exist for an item. The item starts in
    /// [`SubView::View`].
    pub fn register(&mut self, key: ItemKey, sub_views: &[SubView]) {
        self.registered.insert(key.clone(), sub_views.to_vec());
        self.current.insert(key, SubView::View);
    }

    /// Whether any sub-views were registered for `key`.
    pub fn is_known(&self, key: &ItemKey) -> bool {
        self.registered.contains_key(key)
    }

    /// Whether `mode` was registered for `key`.
    pub fn is_registered(&self, key: &ItemKey, mode: SubView) -> bool {
        self.registered
            .get(key)
            .is_some_and(|modes| modes.contains(&mode))
    }

    /// The currently visible sub-view for an item.
    pub fn mode(&self, key: &ItemKey) -> SubView {
        self.current.get(key).copied().unwrap_or_default()
    }

    /// Reveal `target` for `key`, hiding every other sub-view.
    ///
    /// If `target` was never registered for the item this is a rendering
    /// bug: it is logged and the item falls back to [`SubView::View`] so it
    /// is never left with no visible sub-view. Returns the sub-view that is
    /// actually visible afterwards.
    pub fn show(&mut self, key: &ItemKey, target: SubView) -> SubView {
        if !self.is_registered(key, target) {
            let err = StateError::missing_sub_view(key, target);
            tracing::warn!(error = %err, "falling back to plain view");
            self.current.insert(key.clone(), SubView::View);
            return SubView::View;
        }
        self.current.insert(key.clone(), target);
        target
    }
}
