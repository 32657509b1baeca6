//! The logging service
//!
//! `LogService` owns the logger configuration and mutable state (level, file
//! path, tags, flags) behind a single mutex. Every emission runs gate, format,
//! file append and mirror write while holding that lock, so lines never
//! interleave and a rotation in `initialize` completes before the next write.
//!
//! ```ignore
//! let log = LogService::new();
//! log.initialize("app.log", LogLevel::Debug, None)?;
//! log.add_tag("sess1");
//! log.info("hello", Some("north"))?;
//! proclog::log_info!(log, "with caller function")?;
//! ```

use super::caller::CallSite;
use super::file::append_line;
use super::format::{format_line, mirror_short, LineParts};
use super::level::{level_name_to_id, LogLevel};
use super::rotation::rotate_if_oversized;
use super::sink::{ConsoleSink, MirrorSink};
use crate::config::LoggerConfig;
use crate::constants::{DEFAULT_FILE_NAME, DEFAULT_MAX_FILE_SIZE_KB};
use crate::error::{LoggerError, Result};
use chrono::Local;
use parking_lot::Mutex;
use std::panic::Location;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Owner name shown for the service's own notices
const SERVICE_OWNER: &str = "LogService";

#[derive(Debug, Clone)]
struct State {
    level: LogLevel,
    file_path: PathBuf,
    initialized: bool,
    tags: Vec<String>,
    activated: bool,
    show_caller_function: bool,
    max_file_size_kb: u64,
    mirror_to_console: bool,
    unique_id: Option<String>,
}

impl State {
    fn shows_function(&self) -> bool {
        self.level.shows_caller_function() || self.show_caller_function
    }
}

impl Default for State {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file_path: PathBuf::from(DEFAULT_FILE_NAME),
            initialized: false,
            tags: Vec::new(),
            activated: true,
            show_caller_function: false,
            max_file_size_kb: DEFAULT_MAX_FILE_SIZE_KB,
            mirror_to_console: false,
            unique_id: None,
        }
    }
}

/// Gate: emit when switched on and `configured >= requested`
#[inline]
pub fn passes_gate(activated: bool, configured: LogLevel, requested: LogLevel) -> bool {
    activated && configured >= requested
}

/// Leveled file logger with tags, caller context, mirroring and rotation
pub struct LogService {
    state: Mutex<State>,
    sink: Box<dyn MirrorSink>,
}

impl Default for LogService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogService")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl LogService {
    /// Service with default settings, mirroring to the console
    pub fn new() -> Self {
        Self::with_sink(ConsoleSink::new())
    }

    /// Service with default settings and a custom mirror sink
    pub fn with_sink(sink: impl MirrorSink + 'static) -> Self {
        Self {
            state: Mutex::new(State::default()),
            sink: Box::new(sink),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Configure the log file and level, then rotate the file if oversized.
    ///
    /// `file_name` is resolved against the current working directory (an
    /// absolute name is used as is). `max_file_size_kb` is applied only when
    /// given and non-zero.
    pub fn initialize(
        &self,
        file_name: &str,
        level: LogLevel,
        max_file_size_kb: Option<u64>,
    ) -> Result<()> {
        if file_name.trim().is_empty() {
            return Err(LoggerError::invalid("file name", "must not be empty"));
        }
        let cwd =
            std::env::current_dir().map_err(|e| LoggerError::WorkingDirectory { source: e })?;

        let mut state = self.state.lock();
        state.file_path = cwd.join(file_name);
        state.level = level;
        state.initialized = true;
        if let Some(kb) = max_file_size_kb.filter(|kb| *kb > 0) {
            state.max_file_size_kb = kb;
        }
        debug!(
            "Logger initialized: {} at {}",
            state.file_path.display(),
            level
        );

        if let Some(rotated) = rotate_if_oversized(&state.file_path, state.max_file_size_kb) {
            let message = format!(
                "Previous logfile had exceeded the size limit of {} KB and has been renamed to '{}'",
                state.max_file_size_kb,
                rotated.display()
            );
            self.emit(&state, &own_site("initialize"), LogLevel::System, &message, None, false)?;
        }
        Ok(())
    }

    /// Initialize and configure from a `[logger]` config section.
    ///
    /// The show-caller switch goes through `set_show_caller_function` only
    /// when the config changes it, so a default config starts without a notice.
    pub fn apply_config(&self, cfg: &LoggerConfig) -> Result<()> {
        self.initialize(&cfg.file_name, cfg.level, Some(cfg.max_file_size_kb))?;
        self.set_activated(cfg.activated);
        self.set_mirror_to_console(cfg.mirror_to_console);
        if cfg.show_caller_function != self.show_caller_function() {
            self.set_show_caller_function(cfg.show_caller_function);
        }
        for tag in &cfg.tags {
            self.add_tag(tag);
        }
        if cfg.unique_id {
            self.add_unique_id();
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    /// Absolute path of the active log file (relative before `initialize`)
    pub fn file_name(&self) -> PathBuf {
        self.state.lock().file_path.clone()
    }

    pub fn max_file_size_kb(&self) -> u64 {
        self.state.lock().max_file_size_kb
    }

    /// Change the rotation threshold used by the next `initialize`; 0 is rejected
    pub fn set_max_file_size_kb(&self, kb: u64) -> bool {
        if kb == 0 {
            return false;
        }
        self.state.lock().max_file_size_kb = kb;
        true
    }

    // =========================================================================
    // Level control
    // =========================================================================

    pub fn log_level(&self) -> LogLevel {
        self.state.lock().level
    }

    pub fn log_level_id(&self) -> u8 {
        self.log_level().id()
    }

    pub fn log_level_name(&self) -> &'static str {
        self.log_level().name()
    }

    /// Set the configured level; a System notice is written only on change
    pub fn set_log_level(&self, level: LogLevel) -> bool {
        let mut state = self.state.lock();
        if state.level != level {
            state.level = level;
            let message = format!("Loglevel set to {}", level.name());
            self.notice(&state, "set_log_level", &message);
        }
        true
    }

    /// Boolean form over raw ids: `false` for ids outside the defined levels
    pub fn set_log_level_id(&self, id: i64) -> bool {
        match LogLevel::from_id(id) {
            Some(level) => self.set_log_level(level),
            None => false,
        }
    }

    /// Case-insensitive; unknown names select the default level (Info)
    pub fn set_log_level_by_name(&self, name: &str) -> bool {
        self.set_log_level(level_name_to_id(name))
    }

    /// Like `set_log_level_by_name` but unknown names are an error
    pub fn set_log_level_by_name_strict(&self, name: &str) -> Result<()> {
        let level: LogLevel = name.parse()?;
        self.set_log_level(level);
        Ok(())
    }

    // =========================================================================
    // Switches
    // =========================================================================

    /// Master switch; while off, logging calls do nothing at all
    pub fn set_activated(&self, activated: bool) {
        self.state.lock().activated = activated;
    }

    pub fn turn_on(&self) {
        self.set_activated(true);
    }

    pub fn turn_off(&self) {
        self.set_activated(false);
    }

    pub fn is_activated(&self) -> bool {
        self.state.lock().activated
    }

    /// Show `<Owner::function>` on every line; always writes a System notice
    pub fn set_show_caller_function(&self, show: bool) {
        let mut state = self.state.lock();
        let message = format!("Show caller functions is set to: {}", show);
        self.notice(&state, "set_show_caller_function", &message);
        state.show_caller_function = show;
    }

    pub fn show_caller_function(&self) -> bool {
        self.state.lock().show_caller_function
    }

    /// Mirror every full line to the secondary sink
    pub fn set_mirror_to_console(&self, mirror: bool) {
        self.state.lock().mirror_to_console = mirror;
    }

    pub fn mirror_to_console(&self) -> bool {
        self.state.lock().mirror_to_console
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Append a tag; `false` if it is already present
    pub fn add_tag(&self, tag: &str) -> bool {
        let mut state = self.state.lock();
        if state.tags.iter().any(|t| t == tag) {
            return false;
        }
        state.tags.push(tag.to_string());
        true
    }

    /// Remove a tag; `false` if it was not present
    pub fn remove_tag(&self, tag: &str) -> bool {
        let mut state = self.state.lock();
        match state.tags.iter().position(|t| t == tag) {
            Some(idx) => {
                state.tags.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn tags(&self) -> Vec<String> {
        self.state.lock().tags.clone()
    }

    /// Generate a random session id and add it as a tag.
    ///
    /// Returns `None` if the tag could not be added.
    pub fn add_unique_id(&self) -> Option<String> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let mut state = self.state.lock();
        if state.tags.contains(&id) {
            return None;
        }
        state.tags.push(id.clone());
        state.unique_id = Some(id.clone());
        Some(id)
    }

    /// Last id returned by `add_unique_id`
    pub fn unique_id(&self) -> Option<String> {
        self.state.lock().unique_id.clone()
    }

    // =========================================================================
    // Emission
    // =========================================================================

    #[track_caller]
    pub fn system(&self, message: &str, area: Option<&str>) -> Result<()> {
        self.emit_from_caller("system", LogLevel::System, message, area, false)
    }

    #[track_caller]
    pub fn error(&self, message: &str, area: Option<&str>) -> Result<()> {
        self.emit_from_caller("error", LogLevel::Error, message, area, false)
    }

    #[track_caller]
    pub fn warn(&self, message: &str, area: Option<&str>) -> Result<()> {
        self.emit_from_caller("warn", LogLevel::Warn, message, area, false)
    }

    #[track_caller]
    pub fn info(&self, message: &str, area: Option<&str>) -> Result<()> {
        self.emit_from_caller("info", LogLevel::Info, message, area, false)
    }

    #[track_caller]
    pub fn debug(&self, message: &str, area: Option<&str>) -> Result<()> {
        self.emit_from_caller("debug", LogLevel::Debug, message, area, false)
    }

    #[track_caller]
    pub fn trace(&self, message: &str, area: Option<&str>) -> Result<()> {
        self.emit_from_caller("trace", LogLevel::Trace, message, area, false)
    }

    /// Generic entry point with validation and per-call mirroring.
    ///
    /// An empty message is rejected once the level gate has passed.
    #[track_caller]
    pub fn log(
        &self,
        message: &str,
        level: LogLevel,
        area: Option<&str>,
        mirror: bool,
    ) -> Result<()> {
        let location = Location::caller();
        let state = self.state.lock();
        if !passes_gate(state.activated, state.level, level) {
            return Ok(());
        }
        if message.is_empty() {
            return Err(LoggerError::invalid("message", "must not be empty"));
        }
        let site = resolve_site(&state, location, "log");
        self.write_line(&state, &site, level, message, area, mirror)
    }

    /// Emit with an explicit call site (used by the `log_*!` macros)
    pub fn log_at(
        &self,
        site: &CallSite,
        level: LogLevel,
        message: &str,
        area: Option<&str>,
        mirror: bool,
    ) -> Result<()> {
        let state = self.state.lock();
        self.emit(&state, site, level, message, area, mirror)
    }

    /// Gate, then resolve the caller of the public `entry` method
    #[track_caller]
    fn emit_from_caller(
        &self,
        entry: &str,
        level: LogLevel,
        message: &str,
        area: Option<&str>,
        mirror: bool,
    ) -> Result<()> {
        let location = Location::caller();
        let state = self.state.lock();
        if !passes_gate(state.activated, state.level, level) {
            return Ok(());
        }
        let site = resolve_site(&state, location, entry);
        self.write_line(&state, &site, level, message, area, mirror)
    }

    fn emit(
        &self,
        state: &State,
        site: &CallSite,
        level: LogLevel,
        message: &str,
        area: Option<&str>,
        mirror: bool,
    ) -> Result<()> {
        if !passes_gate(state.activated, state.level, level) {
            return Ok(());
        }
        self.write_line(state, site, level, message, area, mirror)
    }

    fn write_line(
        &self,
        state: &State,
        site: &CallSite,
        level: LogLevel,
        message: &str,
        area: Option<&str>,
        mirror: bool,
    ) -> Result<()> {
        let line = format_line(&LineParts {
            timestamp: Local::now(),
            level,
            tags: &state.tags,
            site,
            show_function: state.shows_function(),
            area,
            message,
        });

        append_line(&state.file_path, &line).map_err(|e| LoggerError::Write {
            path: state.file_path.clone(),
            source: e,
        })?;

        let highlight = level.is_highlighted();
        if state.mirror_to_console {
            self.sink.write(&line, highlight);
        }
        if mirror {
            self.sink.write(&mirror_short(level, message), highlight);
        }
        Ok(())
    }

    /// System notice from a setter; failures are reported, not returned
    fn notice(&self, state: &State, function: &str, message: &str) {
        let site = own_site(function);
        if let Err(e) = self.emit(state, &site, LogLevel::System, message, None, false) {
            warn!("Logger notice dropped: {}", e);
        }
    }
}

/// The stack is only walked when the line will show the function
fn resolve_site(state: &State, location: &Location<'_>, entry: &str) -> CallSite {
    if state.shows_function() {
        CallSite::from_backtrace(location, SERVICE_OWNER, entry)
    } else {
        CallSite::from_location(location)
    }
}

fn own_site(function: &str) -> CallSite {
    CallSite::new(file!(), Some(SERVICE_OWNER), function)
}

// ============================================================================
// Tests
// ============================================================================
