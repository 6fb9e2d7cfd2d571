//! Rendering.
//!
//! Every page builds a list of [`UiBlock`]s (multi-line text chunks, some
//! selectable) from the application state; the shared renderer scrolls the
//! list so the selected block stays visible. Rendering reads `App` but
//! never mutates it.

mod admin_page;
mod components;
mod forms_page;
mod helpers;
mod pagination;
mod question_pages;
mod theme;
mod thread;
mod todo_page;

pub use components::{form_lines, render_input_field, INPUT_FIELD_HEIGHT};
pub use helpers::{format_date, format_due_date, truncate};
pub use pagination::nav_line;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Modal, NavSection, PageState, Route};
use theme::{
    COLOR_ACCENT, COLOR_ADMIN, COLOR_BORDER, COLOR_DANGER, COLOR_DIALOG_BG, COLOR_DIM,
    COLOR_SELECTED,
};

/// One vertical chunk of a page.
pub struct UiBlock {
    pub text: Text<'static>,
    /// Whether this block is the current selection
    pub highlight: bool,
}

impl UiBlock {
    pub fn new(text: Text<'static>) -> Self {
        Self {
            text,
            highlight: false,
        }
    }

    pub fn selectable(text: Text<'static>, highlight: bool) -> Self {
        Self { text, highlight }
    }
}

/// Walks the page's selectable blocks in the same order as `App::rows`,
/// reporting which one is selected.
pub(crate) struct SelCursor {
    next: usize,
    selected: usize,
}

impl SelCursor {
    pub(crate) fn new(selected: usize) -> Self {
        Self { next: 0, selected }
    }

    /// Advance past one selectable block; true when it is the selected one.
    pub(crate) fn advance(&mut self) -> bool {
        let hit = self.next == self.selected;
        self.next += 1;
        hit
    }
}

/// Gutter prefix for a block: a marker on the selected one.
pub(crate) fn gutter(selected: bool) -> Span<'static> {
    if selected {
        Span::styled("\u{25b8} ", Style::default().fg(COLOR_SELECTED))
    } else {
        Span::raw("  ")
    }
}

/// Render the whole frame.
pub fn render(frame: &mut Frame, app: &App) {
    let [nav_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_nav(frame, nav_area, app);
    render_body(frame, body_area, app);
    render_footer(frame, footer_area, app);

    if let Some(modal) = &app.modal {
        render_modal(frame, modal);
    }
}

fn render_nav(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.route.nav_section();
    let section = |label: &str, section: NavSection| -> Span<'static> {
        if active == Some(section) {
            Span::styled(
                label.to_string(),
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
        } else {
            Span::styled(label.to_string(), Style::default().fg(COLOR_DIM))
        }
    };

    let mut spans = vec![
        Span::styled(" qboard ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("\u{2502} ", Style::default().fg(COLOR_BORDER)),
        section("[1] Todos", NavSection::Todos),
        Span::raw("  "),
        section("[2] Q&A", NavSection::Questions),
    ];
    if app.is_admin {
        spans.push(Span::raw("  "));
        spans.push(section("[3] Admin", NavSection::Admin));
    }
    spans.push(Span::styled(
        format!("  {}", app.route.location()),
        Style::default().fg(COLOR_DIM),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    match (&app.route, &app.page) {
        (Route::TodoNew, _) => {
            forms_page::render(frame, area, app, "New todo");
            return;
        }
        (Route::QuestionNew, _) => {
            forms_page::render(frame, area, app, "New question");
            return;
        }
        (Route::NotFound, _) => {
            let blocks = vec![
                UiBlock::new(Text::from(vec![
                    Line::raw(""),
                    Line::styled("  404 Not Found", Style::default().add_modifier(Modifier::BOLD)),
                    Line::styled(
                        "  The page you asked for does not exist.",
                        Style::default().fg(COLOR_DIM),
                    ),
                    Line::styled("  Press 1 to go home.", Style::default().fg(COLOR_DIM)),
                ])),
            ];
            render_blocks(frame, area, &blocks);
            return;
        }
        _ => {}
    }

    let blocks = match &app.page {
        PageState::Loading => vec![UiBlock::new(Text::from(vec![
            Line::raw(""),
            Line::styled("  Loading\u{2026}", Style::default().fg(COLOR_DIM)),
        ]))],
        PageState::Failed(message) => vec![error_block(message)],
        PageState::Ready(_) => match &app.route {
            Route::TodoList { .. } => todo_page::blocks(app),
            Route::QuestionList { .. } => question_pages::blocks(app),
            Route::QuestionDetail { .. } => thread::blocks(app),
            Route::Admin => admin_page::blocks(app),
            _ => Vec::new(),
        },
    };
    render_blocks(frame, area, &blocks);
}

/// Inline error block replacing a list that failed to load.
pub(crate) fn error_block(message: &str) -> UiBlock {
    UiBlock::new(Text::from(vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Error: ", Style::default().fg(COLOR_DANGER).add_modifier(Modifier::BOLD)),
            Span::styled(message.to_string(), Style::default().fg(COLOR_DANGER)),
        ]),
    ]))
}

/// Draw blocks top to bottom, scrolled so the highlighted block is visible.
fn render_blocks(frame: &mut Frame, area: Rect, blocks: &[UiBlock]) {
    if area.height == 0 {
        return;
    }
    let heights: Vec<u16> = blocks
        .iter()
        .map(|block| block.text.height().min(u16::MAX as usize) as u16)
        .collect();

    // Scroll back from the selected block until the window is full.
    let mut first = 0;
    if let Some(selected) = blocks.iter().position(|block| block.highlight) {
        let mut used = heights[selected].min(area.height);
        first = selected;
        while first > 0 {
            let height = heights[first - 1];
            if used + height > area.height {
                break;
            }
            used += height;
            first -= 1;
        }
    }

    let mut y = area.y;
    for (block, height) in blocks.iter().skip(first).zip(heights.iter().skip(first)) {
        if y >= area.y + area.height {
            break;
        }
        let height = (*height).min(area.y + area.height - y);
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        frame.render_widget(Paragraph::new(block.text.clone()), rect);
        y += height;
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hint = if app.modal.is_some() {
        "Enter confirm/dismiss \u{b7} Esc cancel"
    } else if app.input_active {
        "Enter submit \u{b7} Esc cancel \u{b7} Tab next field"
    } else {
        match app.route {
            Route::TodoList { .. } => {
                "\u{2191}\u{2193} select \u{b7} Space toggle \u{b7} e edit \u{b7} d delete \u{b7} n new \u{b7} \u{2190}\u{2192} page \u{b7} q quit"
            }
            Route::QuestionList { .. } => {
                "\u{2191}\u{2193} select \u{b7} Enter open \u{b7} n new \u{b7} \u{2190}\u{2192} page \u{b7} q quit"
            }
            Route::QuestionDetail { .. } => {
                "\u{2191}\u{2193} select \u{b7} r reply \u{b7} e edit \u{b7} d delete \u{b7} Enter activate \u{b7} Esc back \u{b7} q quit"
            }
            Route::Admin => {
                "\u{2191}\u{2193} select \u{b7} Enter hard delete \u{b7} \u{2190}\u{2192} bucket page \u{b7} q quit"
            }
            _ => "Esc back \u{b7} q quit",
        }
    };
    frame.render_widget(
        Paragraph::new(Line::styled(
            format!(" {hint}"),
            Style::default().fg(COLOR_DIM),
        )),
        area,
    );
}

fn render_modal(frame: &mut Frame, modal: &Modal) {
    let (title, message, color) = match modal {
        Modal::Error(message) => ("Error", message.as_str(), COLOR_DANGER),
        Modal::Info(message) => ("Notice", message.as_str(), COLOR_ACCENT),
        Modal::Confirm { message, .. } => ("Confirm", message.as_str(), COLOR_ADMIN),
    };
    let hint = match modal {
        Modal::Confirm { .. } => "[Enter/y] Yes   [Esc/n] No",
        _ => "[Enter] OK",
    };

    let area = frame.area();
    let width = (area.width.saturating_sub(8)).min(60).max(20);
    let height = 7;
    let rect = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(COLOR_DIALOG_BG));
    let text = Text::from(vec![
        Line::raw(""),
        Line::raw(message.to_string()),
        Line::raw(""),
        Line::styled(hint, Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
        rect,
    );
}
