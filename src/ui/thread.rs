//! Question detail page: the question block, the answer thread, and the
//! composer.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::app::App;
use crate::state::{layout, EntityKind, ItemKey, SubView, SubViewLayout};
use crate::ui::components::form_lines;
use crate::ui::helpers::format_date;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DANGER, COLOR_DIM, COLOR_MUTED};
use crate::ui::todo_page::inline_prompt;
use crate::ui::{gutter, SelCursor, UiBlock};
use crate::view_state::{
    answer_tree, flatten, AnswerBody, AnswerNode, LoadMoreControl, LoadMorePhase, RenderContext,
    ThreadRow,
};

pub(crate) fn blocks(app: &App) -> Vec<UiBlock> {
    let Some(question) = app.current_question() else {
        return Vec::new();
    };
    let mut cursor = SelCursor::new(app.selected);
    let mut blocks = Vec::new();

    // Question block.
    let key = ItemKey::question(question.id.clone());
    let selected = cursor.advance();
    let mode = app.views.mode(&key);
    let focused = app.input_active && selected;
    let text = match (mode, layout(EntityKind::Question, mode)) {
        (SubView::View, _) => {
            let mut lines = vec![
                Line::raw(""),
                Line::from(vec![
                    gutter(selected),
                    Span::styled(
                        question.subject.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!(
                        "    by {} \u{b7} {}{}",
                        question.creator_ip,
                        format_date(&question.created_at),
                        if question.is_edited() { " (edited)" } else { "" }
                    ),
                    Style::default().fg(COLOR_DIM),
                )),
                Line::raw(""),
            ];
            for content_line in question.content.lines() {
                lines.push(Line::raw(format!("    {content_line}")));
            }
            let mut actions = String::from("    e edit \u{b7} d delete");
            if app.is_admin {
                actions.push_str(" \u{b7} x admin-delete");
            }
            lines.push(Line::styled(actions, Style::default().fg(COLOR_DIM)));
            Text::from(lines)
        }
        (mode, SubViewLayout::Row) => inline_prompt(app, &key, mode, selected, focused),
        (mode, SubViewLayout::Block) => {
            match app.forms.get(&key).and_then(|forms| forms.form(mode)) {
                Some(form) => {
                    let mut lines = vec![Line::from(vec![
                        gutter(selected),
                        Span::styled("Edit question", Style::default().fg(COLOR_ACCENT)),
                    ])];
                    lines.extend(form_lines(form, focused, "    "));
                    Text::from(lines)
                }
                None => Text::from(Line::from(gutter(selected))),
            }
        }
    };
    blocks.push(UiBlock::selectable(text, selected));

    // Thread.
    blocks.push(UiBlock::new(Text::from(vec![
        Line::raw(""),
        Line::styled(
            format!("  Answers ({})", question.answer_count),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])));

    let ctx = RenderContext {
        is_admin: app.is_admin,
        expansions: &app.expansions,
    };
    let tree = answer_tree(&question.answers, &ctx);
    if tree.is_empty() {
        blocks.push(UiBlock::new(Text::from(Line::styled(
            "  No answers yet.",
            Style::default().fg(COLOR_DIM),
        ))));
    }
    for row in flatten(&tree) {
        match row {
            ThreadRow::Answer(node) => {
                let selected = cursor.advance();
                blocks.push(UiBlock::selectable(
                    answer_block(app, node, selected),
                    selected,
                ));
            }
            ThreadRow::LoadMore(node, control) => {
                let selected = cursor.advance();
                blocks.push(UiBlock::selectable(
                    load_more_line(node, control, selected),
                    selected,
                ));
            }
        }
    }

    // Composer.
    let selected = cursor.advance();
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            gutter(selected),
            Span::styled("Write an answer", Style::default().fg(COLOR_ACCENT)),
        ]),
    ];
    if let Some(composer) = &app.composer {
        lines.extend(form_lines(composer, app.input_active && selected, "    "));
    }
    blocks.push(UiBlock::selectable(Text::from(lines), selected));

    blocks
}

fn indent_for(node: &AnswerNode) -> String {
    "  ".repeat(usize::from(node.depth) + 1)
}

fn answer_block(app: &App, node: &AnswerNode, selected: bool) -> Text<'static> {
    let indent = indent_for(node);
    match &node.body {
        AnswerBody::Tombstone { created_at } => Text::from(vec![
            Line::from(vec![
                gutter(selected),
                Span::styled(
                    format!("{}{}", indent, format_date(created_at)),
                    Style::default().fg(COLOR_MUTED),
                ),
            ]),
            Line::styled(
                format!("  {indent}This reply has been deleted."),
                Style::default().fg(COLOR_MUTED).add_modifier(Modifier::ITALIC),
            ),
        ]),
        AnswerBody::Content {
            content,
            creator_ip,
            created_at,
            edited,
            reply_count,
            admin_delete,
        } => {
            let mode = app.views.mode(&node.key);
            let focused = app.input_active && selected;
            match (mode, layout(EntityKind::Answer, mode)) {
                (SubView::View, _) => {
                    let mut lines = vec![Line::from(vec![
                        gutter(selected),
                        Span::styled(
                            format!(
                                "{}by {} \u{b7} {}{}",
                                indent,
                                creator_ip,
                                format_date(created_at),
                                if *edited { " (edited)" } else { "" }
                            ),
                            Style::default().fg(COLOR_DIM),
                        ),
                    ])];
                    for content_line in content.lines() {
                        lines.push(Line::raw(format!("  {indent}{content_line}")));
                    }
                    let mut actions =
                        format!("  {indent}{reply_count} replies \u{b7} r reply \u{b7} e edit \u{b7} d delete");
                    if *admin_delete {
                        actions.push_str(" \u{b7} x admin-delete");
                    }
                    lines.push(Line::styled(actions, Style::default().fg(COLOR_DIM)));
                    Text::from(lines)
                }
                (mode, SubViewLayout::Row) => inline_prompt(app, &node.key, mode, selected, focused),
                (mode, SubViewLayout::Block) => {
                    let title = if mode == SubView::Reply {
                        "Write a reply"
                    } else {
                        "Edit answer"
                    };
                    match app.forms.get(&node.key).and_then(|forms| forms.form(mode)) {
                        Some(form) => {
                            let mut lines = vec![Line::from(vec![
                                gutter(selected),
                                Span::styled(
                                    format!("{}{}", indent, title),
                                    Style::default().fg(COLOR_ACCENT),
                                ),
                            ])];
                            lines.extend(form_lines(form, focused, &format!("  {indent}")));
                            Text::from(lines)
                        }
                        None => Text::from(Line::from(gutter(selected))),
                    }
                }
            }
        }
    }
}

fn load_more_line(node: &AnswerNode, control: &LoadMoreControl, selected: bool) -> Text<'static> {
    let indent = indent_for(node);
    let (label, style) = match control.phase {
        LoadMorePhase::Idle => (
            format!("{}\u{21b3} Load {} more replies", indent, control.hidden),
            Style::default().fg(COLOR_ACCENT),
        ),
        LoadMorePhase::Pending => (
            format!("{}\u{21b3} Loading replies\u{2026}", indent),
            Style::default().fg(COLOR_DIM),
        ),
        LoadMorePhase::Failed => (
            format!("{}\u{21b3} Loading failed. Retry", indent),
            Style::default().fg(COLOR_DANGER),
        ),
    };
    Text::from(Line::from(vec![gutter(selected), Span::styled(label, style)]))
}
