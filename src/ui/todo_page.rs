//! Todo list page.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::app::{App, PageData, PageState};
use crate::state::{layout, EntityKind, ItemKey, SubView, SubViewLayout};
use crate::ui::components::form_lines;
use crate::ui::helpers::{format_date, format_due_date};
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_DONE, COLOR_MUTED};
use crate::ui::{gutter, nav_line, SelCursor, UiBlock};

pub(crate) fn blocks(app: &App) -> Vec<UiBlock> {
    let PageState::Ready(PageData::Todos(page)) = &app.page else {
        return Vec::new();
    };
    let mut cursor = SelCursor::new(app.selected);
    let mut blocks = Vec::new();

    blocks.push(UiBlock::new(Text::from(vec![
        Line::raw(""),
        Line::styled("  My todos", Style::default().add_modifier(Modifier::BOLD)),
    ])));

    let selected = cursor.advance();
    blocks.push(UiBlock::selectable(
        Text::from(Line::from(vec![
            gutter(selected),
            Span::styled("+ New todo", Style::default().fg(COLOR_ACCENT)),
        ])),
        selected,
    ));

    if page.total_items == 0 {
        blocks.push(UiBlock::new(Text::from(Line::styled(
            "  No todos yet.",
            Style::default().fg(COLOR_DIM),
        ))));
        return blocks;
    }

    for todo in &page.items {
        let key = ItemKey::todo(todo.id.clone());
        let selected = cursor.advance();
        let mode = app.views.mode(&key);
        let focused = app.input_active && selected;

        let text = match (mode, layout(EntityKind::Todo, mode)) {
            (SubView::View, _) => {
                let checked = app.todo_checked(todo);
                let checkbox = if checked { "[x]" } else { "[ ]" };
                let task_style = if checked {
                    Style::default()
                        .fg(COLOR_MUTED)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                let mut spans = vec![
                    gutter(selected),
                    Span::styled(
                        checkbox,
                        if checked {
                            Style::default().fg(COLOR_DONE)
                        } else {
                            Style::default()
                        },
                    ),
                    Span::raw(" "),
                    Span::styled(todo.task.clone(), task_style),
                ];
                if todo.due_date.is_some() {
                    spans.push(Span::styled(
                        format!("  due {}", format_due_date(todo.due_date.as_ref())),
                        Style::default().fg(COLOR_DIM),
                    ));
                }
                spans.push(Span::styled(
                    format!(
                        "  {} \u{b7} {}{}",
                        todo.creator_ip,
                        format_date(&todo.created_at),
                        if todo.is_edited() { " (edited)" } else { "" }
                    ),
                    Style::default().fg(COLOR_DIM),
                ));
                Text::from(Line::from(spans))
            }
            (mode, SubViewLayout::Row) => {
                // The one-line delete (or borrowed toggle) prompt.
                inline_prompt(app, &key, mode, selected, focused)
            }
            (mode, SubViewLayout::Block) => {
                match app.forms.get(&key).and_then(|forms| forms.form(mode)) {
                    Some(form) => {
                        let mut lines = vec![Line::from(vec![
                            gutter(selected),
                            Span::styled("Edit todo", Style::default().fg(COLOR_ACCENT)),
                        ])];
                        lines.extend(form_lines(form, focused, "    "));
                        Text::from(lines)
                    }
                    None => Text::from(Line::from(gutter(selected))),
                }
            }
        };
        blocks.push(UiBlock::selectable(text, selected));
    }

    if let Some(nav) = app.todo_nav() {
        let selected = cursor.advance();
        let mut line = nav_line(&nav);
        line.spans.insert(0, gutter(selected));
        blocks.push(UiBlock::selectable(Text::from(line), selected));
    }

    blocks
}

/// One-line prompt for row-layout sub-views (the delete form, possibly
/// repurposed by a toggle session).
pub(crate) fn inline_prompt(
    app: &App,
    key: &ItemKey,
    mode: SubView,
    selected: bool,
    focused: bool,
) -> Text<'static> {
    use crate::ui::components::display_value;

    let Some(form) = app.forms.get(key).and_then(|forms| forms.form(mode)) else {
        return Text::from(Line::raw("  ?"));
    };
    let Some(field) = form.fields.get(form.focus).or_else(|| form.fields.first()) else {
        return Text::from(Line::raw("  ?"));
    };
    let (mut value, style) = display_value(field, focused);
    if focused {
        value.push('\u{2588}');
    }
    Text::from(Line::from(vec![
        gutter(selected),
        Span::styled(
            format!("{}: ", form.password_placeholder()),
            Style::default().fg(COLOR_DIM),
        ),
        Span::styled(value, style),
        Span::styled(
            format!("  [Enter] {}  [Esc] Cancel", form.submit_label),
            Style::default().fg(COLOR_ACCENT),
        ),
    ]))
}
