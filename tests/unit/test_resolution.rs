//! Unit tests for option resolution
//!
//! Raw string options in, `SessionConfiguration` out: defaults, shell-style
//! command splitting, environment splitting and palette parsing.

use std::path::PathBuf;

use easyterm::config::palette::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use easyterm::config::{resolve_command, resolve_environment, resolve_working_directory};
use easyterm::{resolve, ActionDescriptor, Error, Palette, RawActions, RawSessionOptions};
use eframe::egui::Color32;

fn options() -> RawSessionOptions {
    RawSessionOptions::default()
}

#[test]
fn test_defaults() {
    let config = resolve(options()).unwrap();
    assert_eq!(config.working_directory, std::env::current_dir().unwrap());
    assert_eq!(config.command, vec!["/bin/bash"]);
    assert!(config.environment.is_empty());
    assert!(config.actions.is_empty());
    assert!(!config.dark_theme);
    assert_eq!(config.palette, None);
    assert_eq!(config.background(), DEFAULT_BACKGROUND);
    assert_eq!(config.foreground(), DEFAULT_FOREGROUND);
}

#[test]
fn test_working_directory_taken_verbatim() {
    assert_eq!(resolve_working_directory("/var/log").unwrap(), PathBuf::from("/var/log"));
    // not checked for existence here; the spawn reports it
    assert_eq!(
        resolve_working_directory("/no/such/dir").unwrap(),
        PathBuf::from("/no/such/dir")
    );
}

#[test]
fn test_command_quoting() {
    assert_eq!(resolve_command("ls -la").unwrap(), vec!["ls", "-la"]);
    assert_eq!(
        resolve_command(r#"bash -c "echo 'a b'""#).unwrap(),
        vec!["bash", "-c", "echo 'a b'"]
    );
    assert_eq!(resolve_command(r"echo a\ b").unwrap(), vec!["echo", "a b"]);
    assert_eq!(resolve_command("   ").unwrap(), vec!["/bin/bash"]);
}

#[test]
fn test_command_unbalanced_quote_is_error() {
    let err = resolve_command("echo 'oops").unwrap_err();
    assert!(matches!(err, Error::InvalidCommand { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_environment_split() {
    assert_eq!(resolve_environment("A=1 B=2"), vec!["A=1", "B=2"]);
    assert_eq!(resolve_environment("A=1  B=2 "), vec!["A=1", "B=2"]);
    assert!(resolve_environment("").is_empty());
}

#[test]
fn test_palette_needs_two_tokens() {
    assert_eq!(Palette::parse("").unwrap(), None);
    assert_eq!(Palette::parse("black").unwrap(), None);
    assert_eq!(
        Palette::parse("black white").unwrap(),
        Some(Palette::new(Color32::BLACK, Color32::WHITE))
    );
    assert_eq!(
        Palette::parse("#102030 rgb(255,255,255) ignored").unwrap(),
        Some(Palette::new(Color32::from_rgb(0x10, 0x20, 0x30), Color32::WHITE))
    );
}

#[test]
fn test_palette_error_names_token() {
    let mut raw = options();
    raw.palette = "#zzzzzz white".to_string();
    let err = resolve(raw).unwrap_err();
    match &err {
        Error::InvalidColor { token, .. } => assert_eq!(token, "#zzzzzz"),
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().contains("#zzzzzz"));
}

#[test]
fn test_structured_actions_kept_in_order() {
    let mut raw = options();
    raw.actions = RawActions {
        structured: vec![
            ActionDescriptor::new("One", "", "", "echo 1"),
            ActionDescriptor::new("Two", "", "", "echo 2"),
        ],
        flat: vec!["Three".to_string()],
    };
    let config = resolve(raw).unwrap();
    let commands: Vec<&str> = config.actions.iter().map(|a| a.command.as_str()).collect();
    assert_eq!(commands, vec!["echo 1", "echo 2"]);
}

#[test]
fn test_dark_theme_passed_through() {
    let mut raw = options();
    raw.dark_theme = true;
    assert!(resolve(raw).unwrap().dark_theme);
}
