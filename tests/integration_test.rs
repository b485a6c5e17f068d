// Integration tests for userdir-manager config files

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(stem: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    path.push(format!("udm_{stem}_{}_{}.conf", std::process::id(), nonce));
    path
}

// 1) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    use userdir_manager::app::Theme;

    let path = temp_path("theme");
    let path_str = path.to_string_lossy().to_string();

    let t = Theme::mocha();
    t.write_file(&path_str).expect("write theme");
    let t2 = Theme::from_file(&path_str).expect("read theme");
    assert_eq!(format!("{:?}", t.text), format!("{:?}", t2.text));
    assert_eq!(format!("{:?}", t.success), format!("{:?}", t2.success));
    assert_eq!(format!("{:?}", t.error), format!("{:?}", t2.error));

    let p2 = temp_path("theme_init");
    let p2_str = p2.to_string_lossy().to_string();
    let _created = Theme::load_or_init(&p2_str);
    assert!(p2.exists());

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&p2);
}

// 2) Keybinds file overrides defaults
#[test]
fn keymap_file_rebinds_actions() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use userdir_manager::app::keymap::{KeyAction, Keymap};

    let path = temp_path("keys");
    std::fs::write(&path, "# custom\nNewUser = Ctrl+n\nRefresh = F2\n").unwrap();
    let km = Keymap::from_file(&path.to_string_lossy()).expect("read keymap");

    let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
    assert_eq!(km.resolve(&ctrl_n), Some(KeyAction::NewUser));
    let f2 = KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE);
    assert_eq!(km.resolve(&f2), Some(KeyAction::Refresh));
    // Untouched defaults survive.
    let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    assert_eq!(km.resolve(&q), Some(KeyAction::Quit));

    let _ = std::fs::remove_file(&path);
}

// 3) Settings file is created with defaults and command-line values win
#[test]
fn settings_init_and_overrides() {
    use clap::Parser;
    use userdir_manager::app::config::{DEFAULT_API_URL, Settings};
    use userdir_manager::cli::Args;

    let path = temp_path("settings");
    let mut settings = Settings::load_or_init(&path);
    assert!(path.exists());
    assert_eq!(settings.api_url, DEFAULT_API_URL);

    std::fs::write(&path, "api_url = http://files.test/api\nlog_level = debug\n").unwrap();
    settings = Settings::load_or_init(&path);
    assert_eq!(settings.api_url, "http://files.test/api");
    assert_eq!(settings.log_level, "debug");

    let args = Args::parse_from(["userdir-manager", "--api-url", "http://cli.test/api"]);
    settings.apply_overrides(&args);
    assert_eq!(settings.api_url, "http://cli.test/api");
    assert_eq!(settings.log_level, "debug");

    let _ = std::fs::remove_file(&path);
}
