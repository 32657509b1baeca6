//! proclog - leveled file logger CLI
//!
//! Usage:
//!   proclog levels                          Print selectable log levels
//!   proclog write "message" --level warn    Append one message
//!   proclog --level debug demo              Exercise every feature
//!
//! Settings come from `proclog.toml` (or `--config`) and are overridden by
//! command-line flags.

mod cli;
mod demo;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use proclog::constants::DEFAULT_CONFIG_FILE;
use proclog::{config, logging, supported_log_levels, LogLevel, LoggerConfig};
use std::path::PathBuf;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let cfg = logger_config(&cli)?;
    let log = proclog::global();
    log.apply_config(&cfg)
        .with_context(|| format!("Cannot initialize logger with '{}'", cfg.file_name))?;
    debug!("Logging to {}", log.file_name().display());

    match cli.command {
        None | Some(Command::Levels) => {
            for name in supported_log_levels() {
                println!("{}", name);
            }
        }
        Some(Command::Write {
            message,
            level,
            area,
            mirror,
        }) => {
            let level: LogLevel = level.parse()?;
            log.log(&message, level, area.as_deref(), mirror)?;
        }
        Some(Command::Demo) => demo::run(log)?,
    }

    Ok(())
}

/// Config file settings with command-line overrides applied
fn logger_config(cli: &Cli) -> Result<LoggerConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_strict(path)?.logger,
        None => config::load(&PathBuf::from(DEFAULT_CONFIG_FILE)).logger,
    };

    if let Some(file) = &cli.file {
        cfg.file_name = file.clone();
    }
    if let Some(level) = &cli.level {
        cfg.level = level.parse()?;
    }
    if let Some(kb) = cli.max_size_kb {
        cfg.max_file_size_kb = kb;
    }
    cfg.tags.extend(cli.tags.iter().cloned());
    cfg.unique_id |= cli.session_id;
    cfg.mirror_to_console |= cli.mirror;

    Ok(cfg)
}
