//! Secondary (mirror) output
//!
//! Mirror sinks receive a pre-rendered line plus a highlight flag set for
//! Error and Warn messages. Writes are best-effort and never fail.

use crossterm::style::{style, Stylize};
use crossterm::tty::IsTty;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Secondary text output
pub trait MirrorSink: Send + Sync {
    fn write(&self, line: &str, highlight: bool);
}

/// Mirrors to stdout; highlighted lines are black on yellow on a terminal
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    styled: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            styled: std::io::stdout().is_tty(),
        }
    }

    /// Force styling on or off
    pub fn with_styling(styled: bool) -> Self {
        Self { styled }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorSink for ConsoleSink {
    fn write(&self, line: &str, highlight: bool) {
        let mut out = std::io::stdout().lock();
        let _ = if highlight && self.styled {
            writeln!(out, "{}", style(line).black().on_yellow())
        } else {
            writeln!(out, "{}", line)
        };
    }
}

/// One line captured by `BufferSink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorLine {
    pub text: String,
    pub highlight: bool,
}

/// Collects mirrored lines in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    lines: Arc<Mutex<Vec<MirrorLine>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured lines
    pub fn lines(&self) -> Vec<MirrorLine> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl MirrorSink for BufferSink {
    fn write(&self, line: &str, highlight: bool) {
        self.lines.lock().push(MirrorLine {
            text: line.to_string(),
            highlight,
        });
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MirrorSink for NullSink {
    fn write(&self, _line: &str, _highlight: bool) {}
}
