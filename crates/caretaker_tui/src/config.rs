//! Runtime configuration for the caretaker shell.
//!
//! # Responsibility
//! - Resolve where plant data and logs live for this process.
//!
//! # Invariants
//! - `log_dir` is always absolute; `init_logging` rejects relative paths.
//! - No environment variables or command-line flags are consulted.

use caretaker_core::{default_log_level, DATA_FILE_NAME};
use log::LevelFilter;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "virtual-plant-caretaker";
const LOG_DIR_NAME: &str = "logs";

/// Resolved locations and levels used at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Resolves defaults relative to the current working directory.
    ///
    /// The data file sits next to where the app was started; logs go to the
    /// platform data dir when one exists.
    pub fn resolve() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::resolve_in(&cwd, dirs::data_local_dir()))
    }

    fn resolve_in(cwd: &Path, data_local_dir: Option<PathBuf>) -> Self {
        let log_dir = data_local_dir
            .filter(|dir| dir.is_absolute())
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_DIR_NAME))
            .unwrap_or_else(|| cwd.join(LOG_DIR_NAME));

        Self {
            data_file: cwd.join(DATA_FILE_NAME),
            log_dir,
            log_level: default_log_level(),
        }
    }
}
