//! Session configuration for EasyTerm
//!
//! Raw string options (from the command line, a config file or a library
//! caller) are resolved into a [`SessionConfiguration`] exactly once, before
//! any session exists. Resolution applies the defaults:
//!
//! - empty working directory: the process current directory
//! - empty command: `/bin/bash`, otherwise shell-lexical splitting
//! - environment: space-separated `KEY=VALUE` entries
//! - palette: `"BACK FORE"`, absent when fewer than two tokens are given

pub mod cli;
pub mod loader;
pub mod palette;

use std::path::{Path, PathBuf};

use eframe::egui::Color32;

use crate::error::{Error, Result};
use crate::models::ActionDescriptor;
pub use palette::Palette;

/// Shell used when no command is configured
pub const DEFAULT_COMMAND: &str = "/bin/bash";

/// Title shown until the terminal sets its own
pub const DEFAULT_TITLE: &str = "EasyTerm";

/// Actions as they arrive before resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawActions {
    /// Fully formed descriptors (library callers, config file)
    pub structured: Vec<ActionDescriptor>,

    /// Bare tokens from `--actions`; a flat string cannot carry the four
    /// descriptor fields, so these are reported and dropped
    pub flat: Vec<String>,
}

/// Unresolved session options, all strings as the user typed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSessionOptions {
    pub cwd: String,
    pub command: String,
    pub env: String,
    pub actions: RawActions,
    pub palette: String,
    pub dark_theme: bool,
}

/// Fully resolved configuration for one session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfiguration {
    /// Directory the child starts in
    pub working_directory: PathBuf,

    /// Program and arguments, never empty after resolution
    pub command: Vec<String>,

    /// `KEY=VALUE` entries added to the child environment
    pub environment: Vec<String>,

    /// Header-bar quick actions
    pub actions: Vec<ActionDescriptor>,

    /// Prefer the dark variant of the UI theme
    pub dark_theme: bool,

    /// Terminal colors; `None` means the built-in defaults
    pub palette: Option<Palette>,
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            working_directory: PathBuf::new(),
            command: Vec::new(),
            environment: Vec::new(),
            actions: Vec::new(),
            dark_theme: false,
            palette: None,
        }
    }
}

impl SessionConfiguration {
    /// Configuration equivalent to launching with no options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = dir.into();
        self
    }

    pub fn with_command<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = argv.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, entry: impl Into<String>) -> Self {
        self.environment.push(entry.into());
        self
    }

    pub fn with_action(mut self, action: ActionDescriptor) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_dark_theme(mut self, dark: bool) -> Self {
        self.dark_theme = dark;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Fill in the defaults a library caller may have left empty.
    ///
    /// Applied again by the session host, so a hand-built configuration
    /// behaves the same as one produced by [`resolve`].
    pub fn with_defaults(mut self) -> Result<Self> {
        if self.working_directory.as_os_str().is_empty() {
            self.working_directory = current_dir()?;
        }
        if self.command.is_empty() {
            self.command = vec![DEFAULT_COMMAND.to_string()];
        }
        validate_actions(&self.actions)?;
        Ok(self)
    }

    /// Effective terminal colors: the palette or the built-in defaults
    pub fn colors(&self) -> Palette {
        self.palette.unwrap_or_default()
    }

    pub fn background(&self) -> Color32 {
        self.colors().background
    }

    pub fn foreground(&self) -> Color32 {
        self.colors().foreground
    }

    /// Program name used in logs and error messages
    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or(DEFAULT_COMMAND)
    }

    /// Command vector joined back into one displayable line
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Resolve raw options into a session configuration.
///
/// Only the current-directory lookup touches the environment.
pub fn resolve(raw: RawSessionOptions) -> Result<SessionConfiguration> {
    let working_directory = resolve_working_directory(&raw.cwd)?;
    let command = resolve_command(&raw.command)?;
    let environment = resolve_environment(&raw.env);
    let actions = resolve_actions(raw.actions)?;
    let palette = Palette::parse(&raw.palette)?;

    debug!(
        "Resolved session: cwd={}, command={:?}, {} env entries, {} actions, dark={}",
        working_directory.display(),
        command,
        environment.len(),
        actions.len(),
        raw.dark_theme
    );

    Ok(SessionConfiguration {
        working_directory,
        command,
        environment,
        actions,
        dark_theme: raw.dark_theme,
        palette,
    })
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| Error::CurrentDirUnavailable {
        reason: e.to_string(),
    })
}

/// Empty means the current directory at resolution time
pub fn resolve_working_directory(cwd: &str) -> Result<PathBuf> {
    if cwd.is_empty() {
        current_dir()
    } else {
        Ok(Path::new(cwd).to_path_buf())
    }
}

/// Empty means [`DEFAULT_COMMAND`]; anything else is split with shell quoting rules
pub fn resolve_command(command: &str) -> Result<Vec<String>> {
    if command.trim().is_empty() {
        return Ok(vec![DEFAULT_COMMAND.to_string()]);
    }

    match shlex::split(command) {
        Some(argv) if !argv.is_empty() => Ok(argv),
        Some(_) => Ok(vec![DEFAULT_COMMAND.to_string()]),
        None => Err(Error::InvalidCommand {
            command: command.to_string(),
            reason: "unbalanced quotes or trailing escape".to_string(),
        }),
    }
}

/// Split on single spaces; empty fragments are dropped
pub fn resolve_environment(env: &str) -> Vec<String> {
    env.split(' ')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn resolve_actions(raw: RawActions) -> Result<Vec<ActionDescriptor>> {
    for token in &raw.flat {
        warn!(
            "Ignoring action '{}': --actions cannot describe icon, tooltip and command; \
             use [[actions]] in the config file",
            token
        );
    }
    validate_actions(&raw.structured)?;
    Ok(raw.structured)
}

fn validate_actions(actions: &[ActionDescriptor]) -> Result<()> {
    match actions.iter().position(|a| a.command.is_empty()) {
        Some(index) => Err(Error::EmptyActionCommand { index }),
        None => Ok(()),
    }
}
