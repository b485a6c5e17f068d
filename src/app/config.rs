//! Settings file (`userdir.conf`) and config directory resolution.
//!
//! Files use the `key = value` format with `#` comments. Missing files are
//! created with defaults so users have something to edit.

use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_LOG_FILE: &str = "userdir-manager.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const APP_DIR: &str = "userdir-manager";

/// `$XDG_CONFIG_HOME/userdir-manager`, falling back to `$HOME/.config/userdir-manager`.
pub fn config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| Path::new(&h).join(".config")))?;
    Some(base.join(APP_DIR))
}

/// Existing config file `name` in the config directory, if any.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    let p = config_dir()?.join(name);
    p.exists().then_some(p)
}

/// Where `name` should be written; creates the config directory when possible.
pub fn config_file_write_path(name: &str) -> PathBuf {
    match config_dir() {
        Some(dir) => {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                tracing::debug!(dir = %dir.display(), error = %e, "cannot create config dir");
                return PathBuf::from(name);
            }
            dir.join(name)
        }
        None => PathBuf::from(name),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// API root; `/users` is appended.
    pub api_url: String,
    pub log_file: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let settings = Self::default();
        if let Err(e) = settings.write_file(path) {
            tracing::debug!(path = %path.display(), error = %e, "could not write default settings");
        }
        settings
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Unknown keys and empty values are ignored.
    pub fn parse(contents: &str) -> Self {
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (lhs.trim(), rhs.trim());
            if val.is_empty() {
                continue;
            }
            match key {
                "api_url" => cfg.api_url = val.to_string(),
                "log_file" => cfg.log_file = val.to_string(),
                "log_level" => cfg.log_level = val.to_string(),
                _ => {}
            }
        }
        cfg
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        let buf = format!(
            "# userdir-manager settings\n\
             # Root of the REST API; /users is appended\n\
             api_url = {}\n\
             # Log output (the terminal is owned by the UI)\n\
             log_file = {}\n\
             # Filter used when RUST_LOG is not set: error|warn|info|debug|trace\n\
             log_level = {}\n",
            self.api_url, self.log_file, self.log_level
        );
        std::fs::write(path, buf)
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(&mut self, args: &crate::cli::Args) {
        if let Some(url) = &args.api_url {
            self.api_url = url.clone();
        }
        if let Some(file) = &args.log_file {
            self.log_file = file.clone();
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
    }
}
