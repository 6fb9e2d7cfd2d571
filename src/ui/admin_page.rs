//! Admin screen: three buckets of soft-deleted items with independent
//! pagination.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::app::{App, PageData, PageState};
use crate::error::BoardError;
use crate::models::{DeletedKind, Page};
use crate::ui::helpers::{format_date, truncate};
use crate::ui::theme::{COLOR_ADMIN, COLOR_DIM};
use crate::ui::{error_block, gutter, nav_line, SelCursor, UiBlock};

pub(crate) fn blocks(app: &App) -> Vec<UiBlock> {
    let PageState::Ready(PageData::Admin(buckets)) = &app.page else {
        return Vec::new();
    };
    let mut cursor = SelCursor::new(app.selected);
    let mut blocks = Vec::new();

    blocks.push(UiBlock::new(Text::from(vec![
        Line::raw(""),
        Line::styled(
            "  Admin \u{2014} soft-deleted items",
            Style::default()
                .fg(COLOR_ADMIN)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "  Hard delete removes an item permanently.",
            Style::default().fg(COLOR_DIM),
        ),
    ])));

    bucket_section(
        app,
        &mut cursor,
        &mut blocks,
        DeletedKind::Todos,
        "Deleted todos",
        &buckets.todos,
        |todo| (todo.task.clone(), todo.creator_ip.clone(), format_date(&todo.created_at)),
    );
    bucket_section(
        app,
        &mut cursor,
        &mut blocks,
        DeletedKind::Questions,
        "Deleted questions",
        &buckets.questions,
        |question| {
            (
                question.subject.clone(),
                question.creator_ip.clone(),
                format_date(&question.created_at),
            )
        },
    );
    bucket_section(
        app,
        &mut cursor,
        &mut blocks,
        DeletedKind::Answers,
        "Deleted answers",
        &buckets.answers,
        |answer| {
            (
                answer.content.clone(),
                answer.creator_ip.clone(),
                format_date(&answer.created_at),
            )
        },
    );

    blocks
}

/// Render one bucket: header, rows (or an inline error), pagination.
fn bucket_section<T>(
    app: &App,
    cursor: &mut SelCursor,
    blocks: &mut Vec<UiBlock>,
    kind: DeletedKind,
    title: &str,
    bucket: &Result<Page<T>, BoardError>,
    describe: impl Fn(&T) -> (String, String, String),
) where
    T: HasId,
{
    blocks.push(UiBlock::new(Text::from(vec![
        Line::raw(""),
        Line::styled(
            format!("  {title}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])));

    let page = match bucket {
        Ok(page) => page,
        Err(err) => {
            blocks.push(error_block(&err.user_message()));
            return;
        }
    };

    if page.total_items == 0 {
        blocks.push(UiBlock::new(Text::from(Line::styled(
            "  No deleted items.",
            Style::default().fg(COLOR_DIM),
        ))));
        return;
    }

    for item in &page.items {
        let selected = cursor.advance();
        let (content, creator, created) = describe(item);
        blocks.push(UiBlock::selectable(
            Text::from(Line::from(vec![
                gutter(selected),
                Span::styled(
                    format!("{} ", item.id()),
                    Style::default().fg(COLOR_DIM),
                ),
                Span::raw(truncate(&content, 40)),
                Span::styled(
                    format!("  {creator} \u{b7} {created}"),
                    Style::default().fg(COLOR_DIM),
                ),
            ])),
            selected,
        ));
    }

    if let Some(nav) = app.bucket_nav(kind) {
        let selected = cursor.advance();
        let mut line = nav_line(&nav);
        line.spans.insert(0, gutter(selected));
        blocks.push(UiBlock::selectable(Text::from(line), selected));
    }
}

/// Access to the server id of a bucket item.
trait HasId {
    fn id(&self) -> &str;
}

impl HasId for crate::models::Todo {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for crate::models::Question {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for crate::models::Answer {
    fn id(&self) -> &str {
        &self.id
    }
}
