//! Reusable UI components.

mod input_field;

pub use input_field::{display_value, render_input_field, INPUT_FIELD_HEIGHT};

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::state::Form;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM};

/// Compact one-line-per-field rendering for inline forms.
///
/// Produces `label: value` lines with a cursor on the focused field and a
/// trailing key-hint line, ready to embed in an item's block.
pub fn form_lines(form: &Form, focused: bool, indent: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(form.fields.len() + 1);
    for (index, field) in form.fields.iter().enumerate() {
        let field_focused = focused && index == form.focus;
        let (mut value, value_style) = display_value(field, field_focused);
        if field_focused {
            value.push('\u{2588}');
        }
        let mut spans = vec![Span::raw(indent.to_string())];
        if !field.label.is_empty() {
            spans.push(Span::styled(
                format!("{}: ", field.label),
                Style::default().fg(COLOR_DIM),
            ));
        }
        spans.push(Span::styled(value, value_style));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(vec![
        Span::raw(indent.to_string()),
        Span::styled(
            format!("[Enter] {}  [Esc] Cancel  [Tab] Next field", form.submit_label),
            Style::default().fg(COLOR_ACCENT),
        ),
    ]));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FormAction, FormField};

    #[test]
    fn test_form_lines_shape() {
        let form = Form::new(
            FormAction::CreateTodo,
            "Add todo",
            vec![
                FormField::text("Task", "milk"),
                FormField::password(""),
            ],
        );
        let lines = form_lines(&form, true, "  ");
        // One line per field plus the hint line.
        assert_eq!(lines.len(), 3);
    }
}
