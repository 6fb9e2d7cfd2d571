//! Pagination strip rendering.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM};
use crate::view_state::{PageEntry, PageNav};

/// Render a navigation model into one line:
/// `« prev  1 [2] 3  next »`, with disabled markers dimmed and the current
/// page bracketed and non-interactive.
pub fn nav_line<L>(nav: &PageNav<L>) -> Line<'static> {
    let mut spans = Vec::new();

    let prev_style = if nav.prev.is_some() {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    spans.push(Span::styled("\u{ab} prev", prev_style));
    spans.push(Span::raw("  "));

    for entry in &nav.entries {
        match entry {
            PageEntry::Current(page) => {
                spans.push(Span::styled(
                    format!("[{page}]"),
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            PageEntry::Jump { page, .. } => {
                spans.push(Span::styled(
                    format!(" {page} "),
                    Style::default().fg(COLOR_DIM),
                ));
            }
        }
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw(" "));
    let next_style = if nav.next.is_some() {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    spans.push(Span::styled("next \u{bb}", next_style));

    Line::from(spans)
}
