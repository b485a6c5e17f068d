use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, FormScreen, InputMode, ModalState};
use crate::controller::{FormController, FormMode};
use crate::sinks::Route;
use crate::ui;

/// Whether the loop keeps going after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Draw, read keys, and drive controller calls to completion one at a time.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    runtime: &Runtime,
    mut app: AppState,
) -> Result<()> {
    runtime.block_on(enter_route(&mut app, Route::Users));

    loop {
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && runtime.block_on(handle_key(&mut app, key)) == Flow::Quit
        {
            break;
        }
    }

    Ok(())
}

/// Route a key to the handler of the current mode, then follow any navigation
/// the controllers requested. Earlier notifications are dropped first.
pub async fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    app.toasts.clear();
    let flow = match app.input_mode {
        InputMode::Normal => handle_list_key(app, key).await,
        InputMode::Search => {
            handle_search_key(app, key.code);
            Flow::Continue
        }
        InputMode::Form => {
            handle_form_key(app, key.code).await;
            Flow::Continue
        }
        InputMode::Modal => {
            handle_modal_key(app, key.code).await;
            Flow::Continue
        }
    };
    follow_navigation(app).await;
    flow
}

/// Apply pending route requests until none are left.
pub async fn follow_navigation(app: &mut AppState) {
    while let Some(route) = app.routes.take() {
        enter_route(app, route).await;
    }
}

/// Build the state a screen needs when it becomes visible.
pub async fn enter_route(app: &mut AppState, route: Route) {
    debug!(path = %route.path(), "entering route");
    app.modal = None;
    match &route {
        Route::Users => {
            app.form = None;
            app.input_mode = InputMode::Normal;
            app.route = route.clone();
            app.list.fetch().await;
            app.clamp_selection();
        }
        Route::AddUser => {
            let controller = FormController::new(app.collab.clone());
            app.form = Some(FormScreen::new(FormMode::Create, controller));
            app.input_mode = InputMode::Form;
            app.route = route.clone();
        }
        Route::EditUser(id) => {
            let user = match app.list.find(id).cloned() {
                Some(user) => Ok(user),
                None => app.collab.api.get_user(id).await,
            };
            match user {
                Ok(user) => {
                    let controller = FormController::for_user(app.collab.clone(), &user);
                    app.form = Some(FormScreen::new(FormMode::Edit(user.id.clone()), controller));
                    app.input_mode = InputMode::Form;
                    app.route = route.clone();
                }
                Err(e) => {
                    warn!(%id, error = %e, "cannot open editor");
                    app.collab.notifier.notify_error("Failed to fetch user");
                }
            }
        }
    }
}

async fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    let len = app.filtered_len();
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::OpenHelp => {
            app.modal = Some(ModalState::Help);
            app.input_mode = InputMode::Modal;
        }
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::ClearSearch => {
            app.list.set_search_term("");
            app.selected_index = 0;
        }
        KeyAction::NewUser => app.list.open_create(),
        KeyAction::EditSelection => {
            if let Some(id) = app.selected_user().map(|u| u.id.clone()) {
                app.list.open_editor(&id);
            }
        }
        KeyAction::DeleteSelection => {
            if let Some((id, name)) = app.selected_user().map(|u| (u.id.clone(), u.name.clone())) {
                app.modal = Some(ModalState::DeleteConfirm { id, name, selected: 1 });
                app.input_mode = InputMode::Modal;
            }
        }
        KeyAction::Refresh => {
            app.list.refresh().await;
            app.clamp_selection();
        }
        KeyAction::MoveUp => app.selected_index = app.selected_index.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.selected_index + 1 < len {
                app.selected_index += 1;
            }
        }
        KeyAction::PageUp => {
            app.selected_index = app.selected_index.saturating_sub(app.rows_per_page.max(1));
        }
        KeyAction::PageDown => {
            let target = app.selected_index.saturating_add(app.rows_per_page.max(1));
            app.selected_index = target.min(len.saturating_sub(1));
        }
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn handle_search_key(app: &mut AppState, code: KeyCode) {
    let mut term = app.list.search_term().to_string();
    match code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            return;
        }
        KeyCode::Esc => {
            term.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            term.pop();
        }
        KeyCode::Char(c) => term.push(c),
        _ => return,
    }
    app.list.set_search_term(term);
    app.selected_index = 0;
}

async fn handle_form_key(app: &mut AppState, code: KeyCode) {
    let Some(screen) = app.form.as_mut() else {
        app.input_mode = InputMode::Normal;
        return;
    };
    match code {
        KeyCode::Esc => {
            if let Some(screen) = app.form.take() {
                screen.controller.cancel();
            }
        }
        KeyCode::Tab | KeyCode::Down => screen.focus_next(),
        KeyCode::BackTab | KeyCode::Up => screen.focus_prev(),
        KeyCode::Enter => {
            if !screen.controller.submitting() {
                let mode = screen.mode.clone();
                screen.controller.submit(&mode).await;
            }
        }
        KeyCode::Backspace => {
            let field = screen.focused_field();
            let mut value = screen.controller.draft().get(field).to_string();
            value.pop();
            screen.controller.set_field(field, value);
        }
        KeyCode::Char(c) => {
            let field = screen.focused_field();
            let mut value = screen.controller.draft().get(field).to_string();
            value.push(c);
            screen.controller.set_field(field, value);
        }
        _ => {}
    }
}

async fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::DeleteConfirm { id, selected, .. }) => match code {
            KeyCode::Esc | KeyCode::Char('n') => close_modal(app),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => *selected = 1 - (*selected).min(1),
            KeyCode::Enter | KeyCode::Char('y') => {
                let confirmed = *selected == 0 || code == KeyCode::Char('y');
                let id = id.clone();
                close_modal(app);
                // The dialog is the confirmation step; its answer feeds the gate.
                let answer = move |_: &str| confirmed;
                app.list.remove(&id, &answer).await;
                app.clamp_selection();
            }
            _ => {}
        },
        Some(ModalState::Help) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
                close_modal(app);
            }
        }
        None => app.input_mode = back_mode(app),
    }
}

fn back_mode(app: &AppState) -> InputMode {
    if app.form.is_some() {
        InputMode::Form
    } else {
        InputMode::Normal
    }
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = back_mode(app);
}
