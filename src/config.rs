//! Configuration management
//!
//! Logger settings are read from a TOML file with a single `[logger]`
//! section. Every field is optional and falls back to the logger defaults.
//!
//! ```toml
//! [logger]
//! file_name = "app.log"
//! level = "debug"
//! max_file_size_kb = 10240
//! tags = ["api"]
//! unique_id = true
//! ```

use crate::constants::{DEFAULT_FILE_NAME, DEFAULT_MAX_FILE_SIZE_KB};
use crate::error::{LoggerError, Result};
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
}

// =============================================================================
// Logger Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Log file name, resolved against the working directory
    pub file_name: String,

    /// Minimum level emitted (case-insensitive name)
    pub level: LogLevel,

    /// Rotation threshold in KB, checked at startup
    pub max_file_size_kb: u64,

    /// Master switch
    pub activated: bool,

    /// Show the calling function even below Debug
    pub show_caller_function: bool,

    /// Mirror every line to the console
    pub mirror_to_console: bool,

    /// Tags added at startup, in order
    pub tags: Vec<String>,

    /// Add a random session id tag at startup
    pub unique_id: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            level: LogLevel::Info,
            max_file_size_kb: DEFAULT_MAX_FILE_SIZE_KB,
            activated: true,
            show_caller_function: false,
            mirror_to_console: false,
            tags: Vec::new(),
            unique_id: false,
        }
    }
}

/// Parse config from a TOML string
pub fn from_str(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from file, errors are returned
pub fn load_strict(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| LoggerError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    from_str(&content).map_err(|e| LoggerError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load config from file, falling back to defaults when missing or invalid
pub fn load(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match load_strict(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Save config to file
pub fn save(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| LoggerError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(path, content).map_err(|e| LoggerError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })
}

// ============================================================================
// Tests
// ============================================================================
