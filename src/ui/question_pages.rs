//! Question list page.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::app::{App, PageData, PageState};
use crate::ui::helpers::format_date;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM};
use crate::ui::{gutter, nav_line, SelCursor, UiBlock};

pub(crate) fn blocks(app: &App) -> Vec<UiBlock> {
    let PageState::Ready(PageData::Questions(page)) = &app.page else {
        return Vec::new();
    };
    let mut cursor = SelCursor::new(app.selected);
    let mut blocks = Vec::new();

    blocks.push(UiBlock::new(Text::from(vec![
        Line::raw(""),
        Line::styled("  Q&A board", Style::default().add_modifier(Modifier::BOLD)),
    ])));

    let selected = cursor.advance();
    blocks.push(UiBlock::selectable(
        Text::from(Line::from(vec![
            gutter(selected),
            Span::styled("+ New question", Style::default().fg(COLOR_ACCENT)),
        ])),
        selected,
    ));

    if page.total_items == 0 {
        blocks.push(UiBlock::new(Text::from(Line::styled(
            "  No questions yet.",
            Style::default().fg(COLOR_DIM),
        ))));
        return blocks;
    }

    for question in &page.items {
        let selected = cursor.advance();
        let subject_style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let text = Text::from(vec![
            Line::from(vec![
                gutter(selected),
                Span::styled(question.subject.clone(), subject_style),
            ]),
            Line::from(Span::styled(
                format!(
                    "    by {} \u{b7} {} answers \u{b7} {}",
                    question.creator_ip,
                    question.answer_count,
                    format_date(&question.created_at)
                ),
                Style::default().fg(COLOR_DIM),
            )),
        ]);
        blocks.push(UiBlock::selectable(text, selected));
    }

    if let Some(nav) = app.question_nav() {
        let selected = cursor.advance();
        let mut line = nav_line(&nav);
        line.spans.insert(0, gutter(selected));
        blocks.push(UiBlock::selectable(Text::from(line), selected));
    }

    blocks
}
