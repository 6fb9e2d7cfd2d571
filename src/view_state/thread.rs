//! Threaded-answer render tree.
//!
//! [`answer_node`] recursively materializes an [`Answer`] subtree into an
//! immutable description of what the thread looks like: tombstones for
//! soft-deleted answers, interactive nodes otherwise, child nodes for the
//! eagerly-delivered replies, and a load-more control wherever the server
//! reported more direct replies than it embedded (the lazy-expansion
//! boundary). Building is a pure function of the subtree plus the
//! [`RenderContext`]; nothing is cached, and the whole tree is re-derived on
//! every invocation. Event wiring happens separately: [`flatten`] walks the
//! finished tree into a row list keyed by stable node identity.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::models::Answer;
use crate::state::item_view::{ItemKey, SubView};

use super::RenderContext;

/// Sub-views an interactive answer node registers.
pub const ANSWER_SUB_VIEWS: [SubView; 4] =
    [SubView::View, SubView::Edit, SubView::Delete, SubView::Reply];

/// Sub-views a tombstone registers: nothing is actionable on it.
pub const TOMBSTONE_SUB_VIEWS: [SubView; 1] = [SubView::View];

/// Expansion bookkeeping for the current question page.
///
/// The original DOM removed a load-more button once clicked; with full
/// re-derivation that fact has to live here instead. Reset whenever the
/// page reloads from the server.
#[derive(Debug, Default)]
pub struct ExpansionState {
    expanded: HashSet<String>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; the page is re-rendering from the server.
    pub fn reset(&mut self) {
        self.expanded.clear();
        self.pending.clear();
        self.failed.clear();
    }

    /// An expansion fetch for `id` is in flight; its control is disabled.
    pub fn mark_pending(&mut self, id: &str) {
        self.pending.insert(id.to_string());
        self.failed.remove(id);
    }

    /// The fetch succeeded; the control disappears for good.
    pub fn resolve_success(&mut self, id: &str) {
        self.pending.remove(id);
        self.failed.remove(id);
        self.expanded.insert(id.to_string());
    }

    /// The fetch failed; the control becomes re-clickable in its failed
    /// state.
    pub fn resolve_failure(&mut self, id: &str) {
        self.pending.remove(id);
        self.failed.insert(id.to_string());
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }

    pub fn is_failed(&self, id: &str) -> bool {
        self.failed.contains(id)
    }
}

/// Presentation of one answer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerBody {
    /// Soft-deleted: content replaced, subtree retained
    Tombstone { created_at: DateTime<Utc> },
    /// Live answer with its actions
    Content {
        content: String,
        creator_ip: String,
        created_at: DateTime<Utc>,
        edited: bool,
        reply_count: u64,
        /// Offer the admin soft-delete action
        admin_delete: bool,
    },
}

/// State of a load-more control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMorePhase {
    /// Actionable
    Idle,
    /// Fetch in flight; not actionable
    Pending,
    /// Last fetch failed; actionable again
    Failed,
}

/// The affordance standing in for unfetched children.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMoreControl {
    /// The answer whose children it loads
    pub answer_id: String,
    /// How many direct replies are not rendered
    pub hidden: u64,
    pub phase: LoadMorePhase,
}

/// One node of the rendered thread.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerNode {
    /// Stable identity, used for view-state and event wiring
    pub key: ItemKey,
    /// Nesting depth; top-level answers are 0
    pub depth: u16,
    pub body: AnswerBody,
    /// Eagerly-delivered children, one level below this node
    pub children: Vec<AnswerNode>,
    /// Present while unfetched children exist
    pub load_more: Option<LoadMoreControl>,
}

impl AnswerNode {
    /// Whether this node renders as a tombstone.
    pub fn is_tombstone(&self) -> bool {
        matches!(self.body, AnswerBody::Tombstone { .. })
    }

    /// The sub-views this node's item registers with the controller.
    pub fn sub_views(&self) -> &'static [SubView] {
        if self.is_tombstone() {
            &TOMBSTONE_SUB_VIEWS
        } else {
            &ANSWER_SUB_VIEWS
        }
    }
}

/// Build the render tree for one answer and its delivered descendants.
pub fn answer_node(answer: &Answer, ctx: &RenderContext<'_>, depth: u16) -> AnswerNode {
    let body = if answer.is_deleted() {
        AnswerBody::Tombstone {
            created_at: answer.created_at,
        }
    } else {
        AnswerBody::Content {
            content: answer.content.clone(),
            creator_ip: answer.creator_ip.clone(),
            created_at: answer.created_at,
            edited: answer.is_edited(),
            reply_count: answer.reply_count,
            admin_delete: ctx.is_admin,
        }
    };

    // Deletion does not truncate the subtree: children render either way.
    let children = answer
        .replies
        .iter()
        .map(|reply| answer_node(reply, ctx, depth + 1))
        .collect();

    let hidden = answer.hidden_reply_count();
    let load_more = (hidden > 0 && !ctx.expansions.is_expanded(&answer.id)).then(|| {
        let phase = if ctx.expansions.is_pending(&answer.id) {
            LoadMorePhase::Pending
        } else if ctx.expansions.is_failed(&answer.id) {
            LoadMorePhase::Failed
        } else {
            LoadMorePhase::Idle
        };
        LoadMoreControl {
            answer_id: answer.id.clone(),
            hidden,
            phase,
        }
    });

    AnswerNode {
        key: ItemKey::answer(answer.id.clone()),
        depth,
        body,
        children,
        load_more,
    }
}

/// Build the full thread under a question's top-level answers.
pub fn answer_tree(answers: &[Answer], ctx: &RenderContext<'_>) -> Vec<AnswerNode> {
    answers
        .iter()
        .map(|answer| answer_node(answer, ctx, 0))
        .collect()
}

/// A row of the flattened thread, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadRow<'a> {
    /// An answer node (tombstone or interactive)
    Answer(&'a AnswerNode),
    /// A load-more control belonging to the answer that owns it
    LoadMore(&'a AnswerNode, &'a LoadMoreControl),
}

/// Flatten a tree into display order: each node, then its children, then
/// its load-more control. This is the event-wiring pass — rows carry the
/// stable identity the key handlers dispatch on.
pub fn flatten<'a>(nodes: &'a [AnswerNode]) -> Vec<ThreadRow<'a>> {
    let mut rows = Vec::new();
    for node in nodes {
        flatten_into(node, &mut rows);
    }
    rows
}

fn flatten_into<'a>(node: &'a AnswerNode, rows: &mut Vec<ThreadRow<'a>>) {
    rows.push(ThreadRow::Answer(node));
    for child in &node.children {
        flatten_into(child, rows);
    }
    if let Some(control) = &node.load_more {
        rows.push(ThreadRow::LoadMore(node, control));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn answer(id: &str, reply_count: u64, replies: Vec<Answer>) -> Answer {
        Answer {
            id: id.to_string(),
            question_id: "q1".to_string(),
            parent_id: None,
            content: format!("content {id}"),
            creator_ip: "10.0.0.1".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
            updated_at: None,
            deleted_at: None,
            reply_count,
            replies,
        }
    }

    fn deleted(mut a: Answer) -> Answer {
        a.deleted_at = Some(Utc.with_ymd_and_hms(2026, 2, 2, 12, 0, 0).unwrap());
        a.content = String::new();
        a
    }

    fn ctx<'a>(expansions: &'a ExpansionState) -> RenderContext<'a> {
        RenderContext {
            is_admin: false,
            expansions,
        }
    }

    #[test]
    fn test_tombstone_keeps_subtree() {
        let expansions = ExpansionState::new();
        let tree = answer_node(
            &deleted(answer("a1", 1, vec![answer("a2", 0, vec![])])),
            &ctx(&expansions),
            0,
        );

        assert!(tree.is_tombstone());
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].key, ItemKey::answer("a2"));
        assert!(!tree.children[0].is_tombstone());
        assert_eq!(tree.sub_views(), &TOMBSTONE_SUB_VIEWS);
    }

    #[test]
    fn test_tombstone_still_offers_load_more() {
        let expansions = ExpansionState::new();
        let tree = answer_node(&deleted(answer("a1", 2, vec![])), &ctx(&expansions), 0);
        let control = tree.load_more.as_ref().unwrap();
        assert_eq!(control.hidden, 2);
    }

    #[test]
    fn test_load_more_present_iff_hidden_replies() {
        let expansions = ExpansionState::new();
        let context = ctx(&expansions);

        // reply_count 5, two delivered: "load 3 more".
        let partial = answer_node(
            &answer("a1", 5, vec![answer("a2", 0, vec![]), answer("a3", 0, vec![])]),
            &context,
            0,
        );
        let control = partial.load_more.as_ref().unwrap();
        assert_eq!(control.hidden, 3);
        assert_eq!(control.phase, LoadMorePhase::Idle);

        // Fully delivered: absent.
        let full = answer_node(&answer("a1", 1, vec![answer("a2", 0, vec![])]), &context, 0);
        assert!(full.load_more.is_none());

        // No replies at all: absent.
        let leaf = answer_node(&answer("a1", 0, vec![]), &context, 0);
        assert!(leaf.load_more.is_none());
    }

    #[test]
    fn test_load_more_absent_after_successful_expansion() {
        let mut expansions = ExpansionState::new();
        expansions.resolve_success("a1");

        // Even when the refreshed child list is still shorter than the
        // authoritative count, a completed expansion removes the control.
        let node = answer_node(
            &answer("a1", 5, vec![answer("a2", 0, vec![])]),
            &ctx(&expansions),
            0,
        );
        assert!(node.load_more.is_none());
    }

    #[test]
    fn test_load_more_phases() {
        let mut expansions = ExpansionState::new();
        expansions.mark_pending("a1");
        let node = answer_node(&answer("a1", 2, vec![]), &ctx(&expansions), 0);
        assert_eq!(node.load_more.as_ref().unwrap().phase, LoadMorePhase::Pending);

        expansions.resolve_failure("a1");
        let node = answer_node(&answer("a1", 2, vec![]), &ctx(&expansions), 0);
        assert_eq!(node.load_more.as_ref().unwrap().phase, LoadMorePhase::Failed);

        // Retry puts it back to pending.
        expansions.mark_pending("a1");
        let node = answer_node(&answer("a1", 2, vec![]), &ctx(&expansions), 0);
        assert_eq!(node.load_more.as_ref().unwrap().phase, LoadMorePhase::Pending);
    }

    #[test]
    fn test_expansion_replaces_children() {
        let mut expansions = ExpansionState::new();
        let mut parent = answer("a1", 5, vec![answer("old", 0, vec![])]);

        // The expansion fetch returned five fresh children.
        let fetched: Vec<Answer> = (0..5)
            .map(|i| answer(&format!("new{i}"), 0, vec![]))
            .collect();
        parent.replies = fetched;
        expansions.resolve_success("a1");

        let node = answer_node(&parent, &ctx(&expansions), 0);
        assert_eq!(node.children.len(), 5);
        assert!(node.children.iter().all(|c| c.key.id.starts_with("new")));
        assert!(node.load_more.is_none());
    }

    #[test]
    fn test_admin_flag_reaches_every_node() {
        let expansions = ExpansionState::new();
        let context = RenderContext {
            is_admin: true,
            expansions: &expansions,
        };
        let tree = answer_node(
            &answer("a1", 1, vec![answer("a2", 0, vec![])]),
            &context,
            0,
        );
        for node in [&tree, &tree.children[0]] {
            match &node.body {
                AnswerBody::Content { admin_delete, .. } => assert!(admin_delete),
                _ => panic!("expected content body"),
            }
        }
    }

    #[test]
    fn test_flatten_order_and_depth() {
        let expansions = ExpansionState::new();
        let tree = answer_tree(
            &[
                answer("a1", 3, vec![answer("a2", 1, vec![answer("a3", 0, vec![])])]),
                answer("b1", 0, vec![]),
            ],
            &ctx(&expansions),
        );

        let rows = flatten(&tree);
        let labels: Vec<String> = rows
            .iter()
            .map(|row| match row {
                ThreadRow::Answer(node) => format!("a:{}@{}", node.key.id, node.depth),
                ThreadRow::LoadMore(node, control) => {
                    format!("more:{}x{}", node.key.id, control.hidden)
                }
            })
            .collect();

        // Node, children, then the node's own load-more control.
        assert_eq!(
            labels,
            vec!["a:a1@0", "a:a2@1", "a:a3@2", "more:a1x2", "a:b1@0"]
        );
    }

    #[test]
    fn test_expansion_state_reset() {
        let mut expansions = ExpansionState::new();
        expansions.resolve_success("a1");
        expansions.mark_pending("a2");
        expansions.resolve_failure("a3");
        expansions.reset();
        assert!(!expansions.is_expanded("a1"));
        assert!(!expansions.is_pending("a2"));
        assert!(!expansions.is_failed("a3"));
    }
}
