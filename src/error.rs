//! Error types and Result aliases for EasyTerm

use std::fmt;
use std::path::PathBuf;

/// Result type alias for EasyTerm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for EasyTerm
#[derive(Debug)]
pub enum Error {
    // === Configuration errors ===
    /// A palette color token could not be parsed
    InvalidColor {
        token: String,
        reason: String,
    },

    /// The command string is not valid shell-lexical input
    InvalidCommand {
        command: String,
        reason: String,
    },

    /// An action descriptor carries no command to send
    EmptyActionCommand {
        index: usize,
    },

    /// The process current directory could not be determined
    CurrentDirUnavailable {
        reason: String,
    },

    /// Failed to read a configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to parse a configuration file
    ConfigParseFailed {
        path: PathBuf,
        reason: String,
    },

    // === PTY / spawn errors ===
    /// Failed to create PTY
    PtyCreationFailed {
        command: String,
        reason: String,
    },

    /// Failed to spawn command in PTY
    SpawnFailed {
        command: String,
        reason: String,
    },

    /// Failed to clone PTY reader
    PtyReaderCloneFailed {
        reason: String,
    },

    /// Failed to take PTY writer
    PtyWriterTakeFailed {
        reason: String,
    },

    // === Runtime errors ===
    /// Writing into the session input stream failed
    WriteFailed {
        reason: String,
    },

    /// The GUI event loop could not start or aborted
    Gui {
        reason: String,
    },

    /// I/O errors
    Io(std::io::Error),
}

impl Error {
    /// Whether this error belongs to configuration resolution
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidColor { .. }
                | Error::InvalidCommand { .. }
                | Error::EmptyActionCommand { .. }
                | Error::CurrentDirUnavailable { .. }
                | Error::ConfigLoadFailed { .. }
                | Error::ConfigParseFailed { .. }
        )
    }

    /// Whether this error means the session child never started
    pub fn is_spawn_error(&self) -> bool {
        matches!(
            self,
            Error::PtyCreationFailed { .. }
                | Error::SpawnFailed { .. }
                | Error::PtyReaderCloneFailed { .. }
                | Error::PtyWriterTakeFailed { .. }
        )
    }

    /// Process exit code for this error: 2 for configuration problems, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        if self.is_config_error() {
            2
        } else {
            1
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Configuration errors
            Error::InvalidColor { token, reason } => {
                write!(f, "Invalid palette color '{}': {}", token, reason)
            }
            Error::InvalidCommand { command, reason } => {
                write!(f, "Invalid command '{}': {}", command, reason)
            }
            Error::EmptyActionCommand { index } => {
                write!(f, "Action #{} has an empty command", index)
            }
            Error::CurrentDirUnavailable { reason } => {
                write!(f, "Cannot determine current directory: {}", reason)
            }
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigParseFailed { path, reason } => {
                write!(f, "Failed to parse config '{}': {}", path.display(), reason)
            }

            // PTY errors
            Error::PtyCreationFailed { command, reason } => {
                write!(f, "Failed to create PTY for command '{}': {}", command, reason)
            }
            Error::SpawnFailed { command, reason } => {
                write!(f, "Failed to spawn command '{}': {}", command, reason)
            }
            Error::PtyReaderCloneFailed { reason } => {
                write!(f, "Failed to clone PTY reader: {}", reason)
            }
            Error::PtyWriterTakeFailed { reason } => {
                write!(f, "Failed to take PTY writer: {}", reason)
            }

            // Runtime errors
            Error::WriteFailed { reason } => {
                write!(f, "Failed to write to terminal session: {}", reason)
            }
            Error::Gui { reason } => write!(f, "GUI error: {}", reason),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<eframe::Error> for Error {
    fn from(err: eframe::Error) -> Self {
        Error::Gui {
            reason: err.to_string(),
        }
    }
}
