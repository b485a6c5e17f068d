//! Shared UI components (status bar, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode};
use crate::sinks::ToastKind;

/// Mode on the left, latest notification on the right.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Form => "FORM",
        InputMode::Modal => "MODAL",
    };
    let mut spans = vec![Span::raw(format!(" mode: {mode}  users:{} ", app.list.users().len()))];
    if let Some(toast) = app.toasts.latest() {
        let color = match toast.kind {
            ToastKind::Success => app.theme.success,
            ToastKind::Error => app.theme.error,
        };
        spans.push(Span::styled(
            format!(" {} ", toast.message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    let p = Paragraph::new(Line::from(spans)).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Help built from the live keymap so rebinds show up.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 22u16.min(area.height.saturating_sub(4)).max(12);
    let rect = centered_rect(width, height, area);

    let entries = [
        ("Search", KeyAction::StartSearch),
        ("Clear search", KeyAction::ClearSearch),
        ("Add user", KeyAction::NewUser),
        ("Edit user", KeyAction::EditSelection),
        ("Delete user", KeyAction::DeleteSelection),
        ("Refresh", KeyAction::Refresh),
        ("Move up", KeyAction::MoveUp),
        ("Move down", KeyAction::MoveDown),
        ("Page up", KeyAction::PageUp),
        ("Page down", KeyAction::PageDown),
        ("Quit", KeyAction::Quit),
    ];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Users screen", Style::default().add_modifier(Modifier::BOLD))),
    ];
    for (label, action) in entries {
        lines.push(Line::from(vec![
            Span::raw(format!("{label:>14}: ")),
            Span::styled(
                app.keymap.keys_for(action).join(", "),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Form", Style::default().add_modifier(Modifier::BOLD))));
    for (label, keys) in [
        ("Next field", "Tab, Down"),
        ("Previous field", "Shift+Tab, Up"),
        ("Submit", "Enter"),
        ("Cancel", "Esc"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("{label:>14}: ")),
            Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("Close help: Esc / Enter"));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
