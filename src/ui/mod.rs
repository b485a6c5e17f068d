pub mod components;
pub mod form;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};
use crate::sinks::Route;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    let screen = match &app.route {
        Route::Users => "Users Management",
        Route::AddUser => "Add New User",
        Route::EditUser(_) => "Edit User",
    };
    let prompt = match app.input_mode {
        InputMode::Search => format!("  Search: {}_", app.list.search_term()),
        _ if !app.list.search_term().is_empty() => format!("  Search: {}", app.list.search_term()),
        _ => String::new(),
    };
    let p = Paragraph::new(format!(
        "{screen}  ({} users){prompt}  | {}  ?: help",
        app.filtered_len(),
        app.api_url
    ))
    .block(
        Block::default()
            .title("userdir-manager")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    match &app.route {
        Route::Users => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
                .split(root[1]);
            users::render_users_table(f, body[0], app);
            users::render_user_details(f, body[1], app);
        }
        Route::AddUser | Route::EditUser(_) => form::render_form(f, root[1], app),
    }

    components::render_status_bar(f, root[2], app);

    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::DeleteConfirm { .. } => users::render_delete_modal(f, f.area(), app, &state),
            ModalState::Help => components::render_help_modal(f, f.area(), app),
        }
    }
}
