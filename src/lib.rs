//! proclog - process-wide leveled file logger
//!
//! Formats leveled, optionally tagged messages with timestamp and caller
//! metadata, appends them to a log file, optionally mirrors them to a
//! secondary sink and rotates the file when it grows past a size limit.
//!
//! Pass a `LogService` by reference to the components that log; use
//! [`global`] only at the application boundary.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

pub use config::{Config, LoggerConfig};
pub use error::{LoggerError, Result};
pub use logging::{
    level_id_to_name, level_name_to_id, supported_log_levels, BufferSink, CallSite, ConsoleSink,
    LogLevel, LogService, MirrorLine, MirrorSink, NullSink,
};

use std::sync::OnceLock;

static GLOBAL: OnceLock<LogService> = OnceLock::new();

/// Process-wide default service, created with defaults on first use
pub fn global() -> &'static LogService {
    GLOBAL.get_or_init(LogService::new)
}
