//! Input field component.
//!
//! A labeled text input with focus handling, password masking and
//! placeholder text, drawn with rounded borders. Used by the full-page
//! create forms; inline item forms use the compact line renderer in
//! [`super::form_lines`] instead.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::state::FormField;
use crate::ui::theme::{COLOR_BORDER, COLOR_DIM, COLOR_INPUT_BG};

/// Rows one field occupies: label plus a bordered input box.
pub const INPUT_FIELD_HEIGHT: u16 = 4;

/// Render one form field into `area` (which should be
/// [`INPUT_FIELD_HEIGHT`] rows tall).
pub fn render_input_field(frame: &mut Frame, area: Rect, field: &FormField, focused: bool) {
    let label_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    let label_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(field.label.clone(), label_style))),
        label_area,
    );

    let input_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: 3,
    };
    let border_color = if focused { Color::White } else { COLOR_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(COLOR_INPUT_BG));

    let (mut content, content_style) = display_value(field, focused);
    if focused {
        content.push('\u{2588}'); // block cursor
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(content, content_style))).block(block),
        input_area,
    );
}

/// The text shown for a field: masked, placeholder, or plain.
pub fn display_value(field: &FormField, focused: bool) -> (String, Style) {
    if field.is_password && !field.value.is_empty() {
        (
            "\u{2022}".repeat(field.value.chars().count()),
            Style::default().fg(Color::White),
        )
    } else if field.value.is_empty() && !field.placeholder.is_empty() {
        (field.placeholder.clone(), Style::default().fg(COLOR_DIM))
    } else {
        let style = if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        (field.value.clone(), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_masked() {
        let mut field = FormField::password("Delete password");
        field.value = "secret".to_string();
        let (shown, _) = display_value(&field, true);
        assert_eq!(shown, "\u{2022}".repeat(6));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let field = FormField::password("Delete password");
        let (shown, _) = display_value(&field, false);
        assert_eq!(shown, "Delete password");
    }

    #[test]
    fn test_plain_value() {
        let field = FormField::text("Task", "Buy milk");
        let (shown, _) = display_value(&field, true);
        assert_eq!(shown, "Buy milk");
    }
}
