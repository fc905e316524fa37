//! Command line options
//!
//! Flags map one-to-one onto [`RawSessionOptions`]; values given on the
//! command line override the configuration file.

use std::path::PathBuf;

use clap::Parser;

use super::loader::FileConfig;
use super::{RawActions, RawSessionOptions};

/// A minimal terminal window with quick-action buttons.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(name = "easyterm", version, about)]
pub struct CliArgs {
    /// Working directory (defaults to the current directory)
    #[arg(short = 'w', long = "cwd", value_name = "DIR")]
    pub cwd: Option<String>,

    /// Command to run, split with shell quoting rules (defaults to /bin/bash)
    #[arg(short = 'c', long = "command", value_name = "COMMAND", allow_hyphen_values = true)]
    pub command: Option<String>,

    /// Space-separated KEY=VALUE environment entries
    #[arg(short = 'e', long = "env", value_name = "ENV")]
    pub env: Option<String>,

    /// Quick actions (only [[actions]] in the config file can describe them fully)
    #[arg(short = 'a', long = "actions", value_name = "ACTIONS")]
    pub actions: Option<String>,

    /// Use the dark theme
    #[arg(short = 'd', long = "dark-theme")]
    pub dark_theme: bool,

    /// Terminal colors as "BACKGROUND FOREGROUND"
    #[arg(short = 'p', long = "palette", value_name = "PALETTE")]
    pub palette: Option<String>,

    /// Configuration file (defaults to <config dir>/easyterm/config.toml)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// Raw options from the command line alone
    pub fn into_raw_options(self) -> RawSessionOptions {
        self.merge_over(FileConfig::default())
    }

    /// Layer the command line over a loaded configuration file
    pub fn merge_over(self, file: FileConfig) -> RawSessionOptions {
        let mut flat = Vec::new();
        if let Some(actions) = self.actions.filter(|a| !a.is_empty()) {
            flat.push(actions);
        }

        RawSessionOptions {
            cwd: self.cwd.or(file.cwd).unwrap_or_default(),
            command: self.command.or(file.command).unwrap_or_default(),
            env: self.env.or(file.env).unwrap_or_default(),
            actions: RawActions {
                structured: file.actions,
                flat,
            },
            palette: self.palette.or(file.palette).unwrap_or_default(),
            dark_theme: self.dark_theme || file.dark_theme.unwrap_or(false),
        }
    }
}
