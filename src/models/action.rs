//! Quick action descriptor
//!
//! A header-bar button that injects one canned command into the terminal.

use serde::{Deserialize, Serialize};

/// One quick-action button.
///
/// `command` is sent verbatim followed by a newline; nothing is escaped or
/// validated beyond being non-empty. `icon` is a symbolic name that only the
/// rendering layer interprets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ActionDescriptor {
    /// Display name, unused by dispatch
    #[serde(default)]
    pub name: String,

    /// Symbolic icon reference (e.g. `emblem-favorite`)
    #[serde(default)]
    pub icon: String,

    /// Hover text for the button
    #[serde(default)]
    pub tooltip: String,

    /// Literal text written into the session
    pub command: String,
}

impl ActionDescriptor {
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        tooltip: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            tooltip: tooltip.into(),
            command: command.into(),
        }
    }

    /// Bytes written into the session when the action fires
    pub fn payload(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.command.len() + 1);
        bytes.extend_from_slice(self.command.as_bytes());
        bytes.push(b'\n');
        bytes
    }

    /// Label for the button: the name, else the tooltip, else the command
    pub fn label(&self) -> &str {
        [&self.name, &self.tooltip, &self.command]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or_default()
    }
}
