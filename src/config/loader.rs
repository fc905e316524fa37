//! Configuration File Loading
//!
//! Reads the optional TOML file that sits under the command line. String
//! fields use the same formats as their flags; `[[actions]]` tables are the
//! only way to describe quick actions from outside a library call.
//!
//! ```toml
//! cwd = "/"
//! command = "/bin/bash"
//! env = "EDITOR=vim LANG=C.UTF-8"
//! dark_theme = true
//! palette = "#1a1a1a #cccccc"
//!
//! [[actions]]
//! name = "Hello"
//! icon = "emblem-favorite"
//! tooltip = "Say hello to the world"
//! command = "echo Hello World"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::ActionDescriptor;

const CONFIG_DIR_NAME: &str = "easyterm";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of a configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub cwd: Option<String>,
    pub command: Option<String>,
    pub env: Option<String>,
    pub dark_theme: Option<bool>,
    pub palette: Option<String>,
    pub actions: Vec<ActionDescriptor>,
}

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default location, `<config dir>/easyterm/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the explicit file if given, else the default file if it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just means "no file".
    pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_path(&path),
            Some(path) => {
                debug!("No config file at {}, using built-in defaults", path.display());
                Ok(FileConfig::default())
            }
            None => {
                debug!("No config directory on this platform, using built-in defaults");
                Ok(FileConfig::default())
            }
        }
    }

    /// Read and parse one TOML file
    pub fn load_from_path(path: &Path) -> Result<FileConfig> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::parse(path, &content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn parse(path: &Path, content: &str) -> Result<FileConfig> {
        toml::from_str(content).map_err(|e| Error::ConfigParseFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
