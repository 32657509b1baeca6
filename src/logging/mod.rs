//! Logging service
//!
//! Centralizes all log-related types and utilities:
//! - `LogLevel` - Ordered severities and name lookup
//! - `CallSite` - Caller file/function capture
//! - `LogService` - Gate, format, file append, mirror, rotation
//! - `MirrorSink` - Secondary outputs (console, in-memory buffer)

pub mod caller;
pub mod file;
pub mod format;
pub mod level;
pub mod rotation;
pub mod service;
pub mod sink;

pub use caller::CallSite;
pub use level::{level_id_to_name, level_name_to_id, supported_log_levels, LogLevel};
pub use service::{passes_gate, LogService};
pub use sink::{BufferSink, ConsoleSink, MirrorLine, MirrorSink, NullSink};

/// Initialize internal tracing for the logger's own diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
