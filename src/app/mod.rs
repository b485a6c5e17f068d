//! Application state types and entry glue.
//!
//! Defines the screen/mode enums, the colour theme and [`AppState`], which
//! wires the controllers to the terminal's notification and navigation sinks.
//! The event loop lives in [`update`] (re-exported as `run`).
//!
pub mod config;
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::sync::Arc;

use crate::api::UserApi;
use crate::controller::{Collaborators, FormController, FormMode, ListController};
use crate::model::{Field, UserId};
use crate::sinks::{Route, RouteRequests, ToastQueue};
use keymap::Keymap;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub error: Color,
}

const THEME_KEYS: [&str; 12] = [
    "text",
    "muted",
    "title",
    "border",
    "header_bg",
    "header_fg",
    "status_bg",
    "status_fg",
    "highlight_fg",
    "highlight_bg",
    "success",
    "error",
];

impl Theme {
    /// Catppuccin Mocha.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            success: Color::Rgb(0xa6, 0xe3, 0xa1),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "success" => &mut self.success,
            "error" => &mut self.error,
            _ => return None,
        })
    }

    /// Unknown keys or unparsable colours keep the `mocha` value.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            if let (Some(color), Some(slot)) = (parse_color(val), theme.slot(key.trim())) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &str) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|c| Self::parse(&c))
    }

    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdir-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        let mut copy = *self;
        for key in THEME_KEYS {
            if let Some(color) = copy.slot(key) {
                let _ = writeln!(&mut buf, "{} = {}", key, color_to_str(*color));
            }
        }
        std::fs::write(path, buf)
    }

    /// Load `path`, else the config directory copy, else write `mocha` to `path`.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        if let Some(existing) = config::config_file_read_path("theme.conf") {
            return Self::from_file(&existing.to_string_lossy()).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::debug!(path, error = %e, "could not write default theme");
        }
        t
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

/// Parse "#RRGGBB", "RRGGBB" or "reset".
fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        Color::Reset => "reset".to_string(),
        Color::Black => "#000000".to_string(),
        Color::White => "#FFFFFF".to_string(),
        Color::Gray => "#B3B3B3".to_string(),
        Color::DarkGray => "#4D4D4D".to_string(),
        // Named accents have no fixed RGB; fall back to reset.
        _ => "reset".to_string(),
    }
}

/// Modal dialogs layered over the current screen.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalState {
    /// Yes/No gate before deleting; `selected` 0 = Yes, 1 = No.
    DeleteConfirm {
        id: UserId,
        name: String,
        selected: usize,
    },
    Help,
}

/// The add/edit screen: controller plus which input has focus.
pub struct FormScreen {
    pub mode: FormMode,
    pub controller: FormController,
    pub focus: usize,
}

impl FormScreen {
    pub fn new(mode: FormMode, controller: FormController) -> Self {
        Self {
            mode,
            controller,
            focus: 0,
        }
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focus.min(Field::ALL.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }
}

pub struct AppState {
    pub collab: Collaborators,
    pub toasts: Arc<ToastQueue>,
    pub routes: Arc<RouteRequests>,
    pub route: Route,
    pub list: ListController,
    pub form: Option<FormScreen>,
    /// Index into the filtered view.
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub api_url: String,
}

impl AppState {
    /// Build state around `api`, with the terminal's own sinks injected.
    pub fn new(api: Arc<dyn UserApi>, api_url: impl Into<String>, theme: Theme, keymap: Keymap) -> Self {
        let toasts = Arc::new(ToastQueue::default());
        let routes = Arc::new(RouteRequests::default());
        let collab = Collaborators::new(api, toasts.clone(), routes.clone());
        Self {
            list: ListController::new(collab.clone()),
            collab,
            toasts,
            routes,
            route: Route::Users,
            form: None,
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            theme,
            keymap,
            modal: None,
            api_url: api_url.into(),
        }
    }

    pub fn filtered_len(&self) -> usize {
        self.list.filtered().count()
    }

    pub fn selected_user(&self) -> Option<&crate::model::User> {
        self.list.filtered().nth(self.selected_index)
    }

    /// Keep the selection inside the filtered view.
    pub fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.filtered_len().saturating_sub(1));
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
