//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Leveled file logger with tags, caller context and size-based rotation
#[derive(Parser, Debug, Default)]
#[command(name = "proclog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output of the logger itself
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: proclog.toml in the working directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log file name (overrides config)
    #[arg(long, value_name = "NAME")]
    pub file: Option<String>,

    /// Configured log level name (overrides config)
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Rotation threshold in KB (overrides config)
    #[arg(long, value_name = "KB")]
    pub max_size_kb: Option<u64>,

    /// Tag added to every line (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Add a random session id tag
    #[arg(long)]
    pub session_id: bool,

    /// Mirror every line to the console
    #[arg(long)]
    pub mirror: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append one message to the log
    Write {
        /// Message text
        message: String,

        /// Message level name
        #[arg(long, default_value = "Info")]
        level: String,

        /// Area qualifier shown in parentheses
        #[arg(long)]
        area: Option<String>,

        /// Also print `[Level] message` to the console
        #[arg(long)]
        mirror: bool,
    },

    /// Print the selectable log levels
    Levels,

    /// Exercise every level, tags, areas and caller functions
    Demo,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["proclog"]);
        assert!(!cli.verbose);
        assert!(!cli.session_id);
        assert!(cli.tags.is_empty());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_overrides() {
        let cli = Cli::parse_from([
            "proclog", "--file", "app.log", "--level", "debug", "--tag", "a", "--tag", "b",
            "--max-size-kb", "64",
        ]);
        assert_eq!(cli.file.as_deref(), Some("app.log"));
        assert_eq!(cli.level.as_deref(), Some("debug"));
        assert_eq!(cli.tags, vec!["a", "b"]);
        assert_eq!(cli.max_size_kb, Some(64));
    }

    #[test]
    fn test_cli_parse_write() {
        let cli = Cli::parse_from([
            "proclog", "write", "hello", "--level", "warn", "--area", "north",
        ]);
        match cli.command {
            Some(Command::Write {
                message,
                level,
                area,
                mirror,
            }) => {
                assert_eq!(message, "hello");
                assert_eq!(level, "warn");
                assert_eq!(area.as_deref(), Some("north"));
                assert!(!mirror);
            }
            _ => panic!("Expected Write command"),
        }
    }

    #[test]
    fn test_cli_parse_levels() {
        let cli = Cli::parse_from(["proclog", "levels"]);
        assert!(matches!(cli.command, Some(Command::Levels)));
    }
}
