//! Line formatting
//!
//! Pure functions, no I/O. Segment order is fixed:
//! `[ts] [Level] {tag}... file: <Owner::fn> (area) message`

use super::{CallSite, LogLevel};
use crate::constants::{LINE_DATE_FORMAT, ROTATION_DATE_FORMAT};
use chrono::{DateTime, Local};
use std::fmt::Write as _;

/// Everything needed to render one file line
#[derive(Debug, Clone)]
pub struct LineParts<'a> {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub tags: &'a [String],
    pub site: &'a CallSite,
    pub show_function: bool,
    pub area: Option<&'a str>,
    pub message: &'a str,
}

/// Render a full log line without the line terminator
pub fn format_line(parts: &LineParts<'_>) -> String {
    let mut out = String::with_capacity(64 + parts.message.len());

    // Writing into a String cannot fail
    let _ = write!(
        out,
        "[{}] [{}] ",
        parts.timestamp.format(LINE_DATE_FORMAT),
        parts.level.name()
    );
    for tag in parts.tags {
        let _ = write!(out, "{{{}}} ", tag);
    }
    let _ = write!(out, "{}: ", parts.site.short_file());
    if parts.show_function {
        out.push_str(&parts.site.function_segment());
    }
    if let Some(area) = parts.area {
        let _ = write!(out, "({}) ", area);
    }
    out.push_str(parts.message);
    out
}

/// Short mirror form used by the per-call mirror flag
pub fn mirror_short(level: LogLevel, message: &str) -> String {
    format!("[{}] {}", level.name(), message)
}

/// 14-digit stamp used in rotated file names
pub fn rotation_stamp(now: DateTime<Local>) -> String {
    now.format(ROTATION_DATE_FORMAT).to_string()
}
