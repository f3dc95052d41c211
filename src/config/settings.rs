use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::util::config_path;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Filter directive for the log file (RUST_LOG syntax)
    pub log_filter: String,
    /// File name of the SQLite database inside the data directory
    pub database_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            database_file: "wardbook.db".to_string(),
        }
    }
}

/// Raw TOML shape of the optional config file
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    log_filter: Option<String>,
    database_file: Option<String>,
}

impl Config {
    /// Load from the config file in the data directory, if present.
    /// Missing or unreadable files fall back to the defaults; a file that
    /// fails to parse is reported but never fatal.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    fn load_from(path: &Path) -> Self {
        let mut config = Self::default();
        let Ok(raw) = fs::read_to_string(path) else {
            return config;
        };
        match toml::from_str::<TomlConfig>(&raw) {
            Ok(parsed) => {
                if let Some(log_filter) = parsed.log_filter {
                    config.log_filter = log_filter;
                }
                if let Some(database_file) = parsed.database_file {
                    config.database_file = database_file;
                }
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Ignoring unparseable config file");
            }
        }
        config
    }
}
