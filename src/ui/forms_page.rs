//! Full-page create forms (new todo, new question).

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::components::{render_input_field, INPUT_FIELD_HEIGHT};
use crate::ui::theme::COLOR_DIM;

pub(crate) fn render(frame: &mut Frame, area: Rect, app: &App, title: &str) {
    let Some(form) = &app.create_form else {
        return;
    };

    let width = area.width.saturating_sub(4).min(64);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let mut y = area.y + 1;

    let title_area = Rect {
        x,
        y,
        width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Line::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title_area,
    );
    y += 2;

    for (index, field) in form.fields.iter().enumerate() {
        if y + INPUT_FIELD_HEIGHT > area.y + area.height {
            break;
        }
        let field_area = Rect {
            x,
            y,
            width,
            height: INPUT_FIELD_HEIGHT,
        };
        render_input_field(
            frame,
            field_area,
            field,
            app.input_active && index == form.focus,
        );
        y += INPUT_FIELD_HEIGHT + 1;
    }

    if y < area.y + area.height {
        let hint_area = Rect {
            x,
            y,
            width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("[Enter] {}  [Esc] Back to list", form.submit_label),
                Style::default().fg(COLOR_DIM),
            )),
            hint_area,
        );
    }
}
