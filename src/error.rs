//! Centralized error types for the logger
//!
//! All logger errors are represented by the `LoggerError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, LoggerError>`.
//!
//! Errors fall into two groups: invalid arguments (raised before any state
//! change or I/O) and runtime failures coming from the environment.

use std::fmt;
use std::path::PathBuf;

/// All logger errors
#[derive(Debug)]
pub enum LoggerError {
    // === Arguments ===
    /// Caller supplied a malformed parameter
    InvalidArgument {
        field: &'static str,
        reason: String,
    },

    // === Environment ===
    /// Current working directory could not be determined
    WorkingDirectory { source: std::io::Error },
    /// Appending to the log file failed
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Config ===
    /// Config file could not be read or written
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file content is not valid
    ConfigParse { path: PathBuf, reason: String },
}

impl LoggerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Caller-side error (bad parameter)
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Environment-side error (working directory, file system, config)
    pub fn is_runtime(&self) -> bool {
        !self.is_invalid_argument()
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WorkingDirectory { source }
            | Self::Write { source, .. }
            | Self::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::WorkingDirectory { .. } => {
                write!(f, "Cannot determine current working directory")
            }
            Self::Write { path, .. } => {
                write!(f, "Can not write into log file with name '{}'", path.display())
            }
            Self::ConfigRead { path, .. } => write!(f, "Config IO error: {}", path.display()),
            Self::ConfigParse { path, reason } => {
                write!(f, "Config parse error in {}: {}", path.display(), reason)
            }
        }
    }
}

/// Alias for Result with LoggerError
pub type Result<T> = std::result::Result<T, LoggerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_write_error_names_path() {
        let err = LoggerError::Write {
            path: PathBuf::from("/var/log/app.log"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/var/log/app.log"));
        assert!(err.source().is_some());
        assert!(err.is_runtime());
    }

    #[test]
    fn test_invalid_argument_classification() {
        let err = LoggerError::invalid("message", "must not be empty");
        assert!(err.is_invalid_argument());
        assert!(!err.is_runtime());
        assert_eq!(err.to_string(), "Invalid message: must not be empty");
        assert!(err.source().is_none());
    }
}
