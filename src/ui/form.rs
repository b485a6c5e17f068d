use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;
use crate::controller::FormMode;
use crate::model::Field;

/// Four labelled inputs with inline errors, then the action hints.
pub fn render_form(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(screen) = app.form.as_ref() else {
        return;
    };
    let (title, subtitle, action, busy) = match screen.mode {
        FormMode::Create => ("Add New User", "Create a new user profile", "Create User", "Creating..."),
        FormMode::Edit(_) => ("Edit User", "Update this user's profile", "Save Changes", "Saving..."),
    };

    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(Field::ALL.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    f.render_widget(
        Paragraph::new(subtitle).style(Style::default().fg(app.theme.muted)),
        rows[0],
    );

    let controller = &screen.controller;
    for (i, field) in Field::ALL.iter().copied().enumerate() {
        let focused = screen.focus == i;
        let error = controller.field_errors().get(field);
        let border = match (error, focused) {
            (Some(_), _) => app.theme.error,
            (None, true) => app.theme.highlight_fg,
            (None, false) => app.theme.border,
        };
        let mut value = controller.draft().get(field).to_string();
        if focused {
            value.push('_');
        }
        let mut lines = vec![Line::from(Span::styled(value, Style::default().fg(app.theme.text)))];
        if let Some(message) = error {
            lines.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(app.theme.error).add_modifier(Modifier::ITALIC),
            )));
        }
        let block = Block::default()
            .title(field.label())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        f.render_widget(Paragraph::new(lines).block(block), rows[i + 1]);
    }

    let label = if controller.submitting() { busy } else { action };
    let hints = Line::from(vec![
        Span::styled(format!("[Enter] {label}"), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        Span::raw("   [Esc] Cancel   [Tab/Shift+Tab] Next/previous field"),
    ]);
    f.render_widget(Paragraph::new(hints), rows[Field::ALL.len() + 1]);
}
