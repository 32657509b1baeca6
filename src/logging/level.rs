//! Log levels
//!
//! The numeric order is part of the contract: the gate emits a message when
//! `configured >= requested`. `System` has the lowest id so it passes every
//! configured level, including `Off`.

use crate::constants::UNDEFINED_LEVEL_NAME;
use crate::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered by id
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum LogLevel {
    /// Always shown, but not an error
    System = 1,
    Off = 2,
    Error = 3,
    Warn = 4,
    #[default]
    Info = 5,
    Debug = 6,
    Trace = 7,
}

impl LogLevel {
    /// All levels in id order
    pub const ALL: [LogLevel; 7] = [
        LogLevel::System,
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Numeric id
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Canonical display name
    pub fn name(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Off => "Off",
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    /// Level for an id, `None` outside 1..=7
    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|l| i64::from(l.id()) == id)
    }

    /// Case-insensitive lookup, `None` for unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Debug and Trace show the caller function on every line
    #[inline]
    pub fn shows_caller_function(self) -> bool {
        matches!(self, Self::Debug | Self::Trace)
    }

    /// Error and Warn are highlighted on the mirror sink
    #[inline]
    pub fn is_highlighted(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i64> for LogLevel {
    type Error = LoggerError;

    fn try_from(id: i64) -> Result<Self, LoggerError> {
        Self::from_id(id).ok_or_else(|| {
            LoggerError::invalid("level", format!("{} is not a defined log level", id))
        })
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            LoggerError::invalid("level", format!("unknown log level name '{}'", s))
        })
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, LoggerError> {
        s.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.name().to_string()
    }
}

/// Name for a raw level id; `"undefined"` for anything else
pub fn level_id_to_name(id: i64) -> &'static str {
    LogLevel::from_id(id)
        .map(LogLevel::name)
        .unwrap_or(UNDEFINED_LEVEL_NAME)
}

/// Lenient name lookup: unknown names fall back to the default level (Info)
pub fn level_name_to_id(name: &str) -> LogLevel {
    LogLevel::from_name(name).unwrap_or_default()
}

/// Levels a user normally picks from, Error through Trace
pub fn supported_log_levels() -> Vec<&'static str> {
    (LogLevel::Error.id()..=LogLevel::Trace.id())
        .map(|id| level_id_to_name(i64::from(id)))
        .collect()
}
