use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, ModalState};
use crate::model::User;
use crate::search::empty_state_message;

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title(if app.list.refreshing() { "Users (refreshing…)" } else { "Users" })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.list.loading() {
        let p = Paragraph::new("Loading users…")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let visible: Vec<&User> = app.list.filtered().collect();
    if visible.is_empty() {
        let hint = if app.list.search_term().is_empty() { "\n\nPress n to add one." } else { "" };
        let p = Paragraph::new(format!("No users found\n\n{}{hint}", empty_state_message(app.list.search_term())))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(visible.len());

    let rows = visible[start..end].iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.selected_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(u.age.to_string()),
            Cell::from(u.profession.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(35),
        Constraint::Length(5),
        Constraint::Percentage(30),
    ];
    let header = Row::new(vec!["NAME", "EMAIL", "AGE", "PROFESSION"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let text = match app.selected_user() {
        Some(u) => {
            let stamp = |t: Option<chrono::DateTime<chrono::Utc>>| {
                t.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| "-".to_string())
            };
            format!(
                "[{}]  {}\n\nEmail: {}\nAge: {}\nProfession: {}\n\nID: {}\nCreated: {}\nUpdated: {}",
                u.initial().unwrap_or('?'),
                u.name,
                u.email,
                u.age,
                u.profession,
                u.id,
                stamp(u.created_at),
                stamp(u.updated_at),
            )
        }
        None => String::new(),
    };
    let p = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

pub fn render_delete_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::DeleteConfirm { name, selected, .. } = state {
        let rect = crate::ui::components::centered_rect(52, 7, area);
        let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
        let no = if *selected == 1 { "[No]" } else { " No " };
        let body = format!(
            "{}\n'{name}'\n\n  {yes}    {no}",
            crate::controller::list::DELETE_PROMPT
        );
        let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Confirm delete")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}
