//! Feature walkthrough
//!
//! Writes a block of lines covering every level at every configured level,
//! tags and areas, caller functions inside a type and the lookup helpers.

use proclog::{level_id_to_name, log_system, CallSite, LogLevel, LogService, Result};

/// Configured levels walked through by the demo, in order
const DEMO_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

struct Patrol;

impl Patrol {
    fn want_to_log(&self, log: &LogService, area: Option<&str>) -> Result<()> {
        log_at_every_level(log, &proclog::call_site!(), area)
    }
}

fn log_at_every_level(log: &LogService, site: &CallSite, area: Option<&str>) -> Result<()> {
    log.log_at(site, LogLevel::System, "System Entry", area, false)?;
    log.log_at(site, LogLevel::Error, "Error Entry", area, false)?;
    log.log_at(site, LogLevel::Warn, "Warning Entry", area, false)?;
    log.log_at(site, LogLevel::Info, "Info Entry", area, false)?;
    log.log_at(site, LogLevel::Debug, "Debug Entry", area, false)?;
    log.log_at(site, LogLevel::Trace, "Trace Entry", area, false)
}

fn want_to_log_too(log: &LogService) -> Result<()> {
    log_system!(log, "Functions can log too")
}

pub fn run(log: &LogService) -> Result<()> {
    let initial = log.log_level();
    log.system("<================= Log test started", None)?;
    log.system(
        &format!("Logger initialized with log level: {}", log.log_level_name()),
        None,
    )?;

    log.system("--------> Test 1: all message levels at all configured levels", None)?;
    for name in DEMO_LEVELS {
        log.set_log_level_by_name(name);
        log.system("System Entry", None)?;
        log.error("Error Entry", None)?;
        log.warn("Warning Entry", None)?;
        log.info("Info Entry", None)?;
        log.debug("Debug Entry", None)?;
        log.trace("Trace Entry", None)?;
    }

    log.system("--------> Test 2: tags and areas", None)?;
    log.set_log_level(LogLevel::Info);
    log.add_tag("Special Forces");
    log.info("Somalia action", None)?;
    log.add_tag("UN peace keeping forces");
    log.info("Afghanistan", None)?;
    log.info("Afghanistan", Some("North-Area"))?;
    log.remove_tag("UN peace keeping forces");
    log.info("Afghanistan", Some("North-Area"))?;
    log.remove_tag("Special Forces");

    log.system("--------> Test 3: caller functions", None)?;
    let patrol = Patrol;
    for show in [false, true] {
        log.set_show_caller_function(show);
        for name in DEMO_LEVELS {
            log.set_log_level_by_name(name);
            patrol.want_to_log(log, None)?;
        }
        want_to_log_too(log)?;
    }
    log.set_show_caller_function(false);
    log.set_log_level(LogLevel::Info);
    patrol.want_to_log(log, None)?;

    log.system("--------> Test 4: utility functions", None)?;
    log.system(
        &format!(
            "Current level resolves to '{}'",
            level_id_to_name(i64::from(log.log_level_id()))
        ),
        None,
    )?;
    log.log("Mirrored to the console", LogLevel::Warn, None, true)?;

    log.system("--------> Test 5: tags + area + session id", None)?;
    log.add_tag("Special Forces");
    if let Some(id) = log.add_unique_id() {
        log.system(&format!("Session id {}", id), None)?;
    }
    log.set_show_caller_function(true);
    patrol.want_to_log(log, Some("South Africa"))?;

    log.remove_tag("Special Forces");
    if let Some(id) = log.unique_id() {
        log.remove_tag(&id);
    }
    log.set_show_caller_function(false);
    log.set_log_level(initial);
    log.system("Log test finished =================>", None)
}
