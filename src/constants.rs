//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Log file
// =============================================================================

/// Log file name used before `initialize` is called
pub const DEFAULT_FILE_NAME: &str = "logfile.log";

/// Rotation threshold in kilobytes (50 MB)
pub const DEFAULT_MAX_FILE_SIZE_KB: u64 = 51_200;

/// Extension given to rotated log files
pub const ROTATED_EXTENSION: &str = "log";

/// Line terminator appended to every written line
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Line terminator appended to every written line
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

// =============================================================================
// Formatting
// =============================================================================

/// Timestamp at the start of each log line
pub const LINE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp appended to rotated file names (14 digits)
pub const ROTATION_DATE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Name returned for level ids outside the defined range
pub const UNDEFINED_LEVEL_NAME: &str = "undefined";

// =============================================================================
// Configuration
// =============================================================================

/// Default config file looked up by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "proclog.toml";
