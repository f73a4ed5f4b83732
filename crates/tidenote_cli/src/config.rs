//! Settings resolution for the CLI.
//!
//! Precedence: command-line flags, then `TIDENOTE_*` environment variables,
//! then defaults (a `tidenote` directory under the platform temp dir).

use std::env;
use std::path::PathBuf;
use tidenote_core::default_log_level;

const STORE_FILE_NAME: &str = "tidenote.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite file backing the snapshot store.
    pub store_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    /// Log level passed to the core logging bootstrap.
    pub log_level: String,
}

impl Settings {
    pub fn resolve(
        data_dir: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Self {
        let data_dir = absolutize(
            data_dir
                .or_else(|| env_path("TIDENOTE_DATA_DIR"))
                .unwrap_or_else(|| env::temp_dir().join("tidenote")),
        );

        let log_dir = log_dir
            .or_else(|| env_path("TIDENOTE_LOG_DIR"))
            .map(absolutize)
            .unwrap_or_else(|| data_dir.join("logs"));

        let log_level = log_level
            .or_else(|| env_string("TIDENOTE_LOG_LEVEL"))
            .unwrap_or_else(|| default_log_level().to_string());

        Self {
            store_path: data_dir.join(STORE_FILE_NAME),
            log_dir,
            log_level,
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env_string(key).map(PathBuf::from)
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}
