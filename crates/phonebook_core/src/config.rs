//! Fixed runtime locations for the directory tool.
//!
//! # Responsibility
//! - Derive storage and log paths from a base directory.
//! - Pick the default log level for the current build mode.
//!
//! # Invariants
//! - No environment variables or flags are consulted.
//! - The storage file name is fixed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Storage file name inside the base directory.
pub const DIRECTORY_FILE_NAME: &str = "phone_directory.json";
/// Log directory name inside the base directory.
pub const LOG_DIR_NAME: &str = "phonebook_logs";

#[derive(Debug)]
pub enum ConfigError {
    /// The process working directory could not be resolved.
    WorkingDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkingDir(err) => write!(f, "не удалось определить рабочий каталог: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WorkingDir(err) => Some(err),
        }
    }
}

/// Resolved locations and log level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub storage_path: PathBuf,
    /// Absolute when `base` was absolute.
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl DirectoryConfig {
    /// Configuration rooted at `base`.
    pub fn in_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            storage_path: base.join(DIRECTORY_FILE_NAME),
            log_dir: base.join(LOG_DIR_NAME),
            log_level: default_log_level(),
        }
    }

    /// Configuration rooted at the process working directory.
    pub fn from_working_dir() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDir)?;
        Ok(Self::in_dir(cwd))
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}
