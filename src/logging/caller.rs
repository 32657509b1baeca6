//! Call-site capture
//!
//! Each log line names the source file that called the logger and, when
//! enabled, the function (and enclosing type) it was called from.
//!
//! Two capture paths exist:
//! - `call_site!()` resolves the enclosing function path at compile time
//! - `CallSite::from_backtrace()` takes the file from `#[track_caller]` and
//!   the function from the frame below the logger's entry method. Without
//!   symbols the function stays unknown and only the file is shown.

use std::backtrace::Backtrace;
use std::panic::Location;

/// Where a log call originated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallSite {
    /// Source file as reported by the compiler (may include directories)
    pub file: String,
    /// Enclosing type, when the call happened inside an impl block
    pub owner: Option<String>,
    /// Enclosing function
    pub function: Option<String>,
}

impl CallSite {
    /// Explicit call site
    pub fn new(file: impl Into<String>, owner: Option<&str>, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            owner: owner.map(String::from),
            function: Some(function.into()),
        }
    }

    /// File-only call site of whoever called the current `#[track_caller]` chain
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    /// File-only call site
    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            owner: None,
            function: None,
        }
    }

    /// Resolve the function that called `owner::entry` from a captured stack.
    ///
    /// `location` is the `#[track_caller]` location of that call; the frame is
    /// only trusted when its source file agrees with it.
    pub fn from_backtrace(location: &Location<'_>, owner: &str, entry: &str) -> Self {
        let trace = Backtrace::force_capture().to_string();
        match caller_symbol(&trace, location.file(), owner, entry) {
            Some(symbol) => Self::from_path(location.file(), &symbol),
            None => Self::from_location(location),
        }
    }

    /// Build from a file and the `type_name` of a marker fn nested in the caller.
    ///
    /// Used by `call_site!()`; `path` looks like `krate::module::Type::method::__f`.
    pub fn from_path(file: &str, path: &str) -> Self {
        let path = path.strip_suffix("::__f").unwrap_or(path);

        // `{{closure}}` (legacy symbols) or `{closure#0}` (v0 symbols)
        let mut segments = split_path(path);
        while segments.last().is_some_and(|s| s.starts_with('{')) {
            segments.pop();
        }
        let function = segments.last().map(|s| strip_generics(s).to_string());
        let owner = match segments.len() {
            0 | 1 => None,
            n => owner_from_segment(segments[n - 2]),
        };

        Self {
            file: file.to_string(),
            owner,
            function,
        }
    }

    /// Base name of the source file, extension kept
    pub fn short_file(&self) -> &str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file.as_str())
    }

    /// `<Owner::function> ` or `<function> `; empty when the function is unknown
    pub fn function_segment(&self) -> String {
        match (&self.owner, &self.function) {
            (Some(owner), Some(function)) => format!("<{}::{}> ", owner, function),
            (None, Some(function)) => format!("<{}> ", function),
            (_, None) => String::new(),
        }
    }
}

/// Split on `::` outside of angle brackets
fn split_path(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments.retain(|s| !s.is_empty());
    segments
}

/// One symbol of a rendered backtrace and the source file it resolved to
struct Frame<'a> {
    symbol: &'a str,
    file: Option<&'a str>,
}

/// Parse `Backtrace`'s display form.
///
/// Symbol lines are `  N: path` (inlined symbols may omit `N:`), each
/// optionally followed by `at file:line:col`.
fn parse_frames(trace: &str) -> Vec<Frame<'_>> {
    let mut frames: Vec<Frame<'_>> = Vec::new();
    for line in trace.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(at) = line.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                last.file = Some(strip_line_column(at));
            }
            continue;
        }
        let symbol = match line.split_once(": ") {
            Some((idx, rest)) if idx.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => line,
        };
        frames.push(Frame {
            symbol: strip_symbol_hash(symbol),
            file: None,
        });
    }
    frames
}

/// `path/to/file.rs:12:5` -> `path/to/file.rs`
fn strip_line_column(at: &str) -> &str {
    let mut file = at;
    for _ in 0..2 {
        match file.rsplit_once(':') {
            Some((head, tail)) if tail.chars().all(|c| c.is_ascii_digit()) => file = head,
            _ => break,
        }
    }
    file
}

/// Drop a legacy `::h0123456789abcdef` suffix
fn strip_symbol_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            head
        }
        _ => symbol,
    }
}

/// `path::Owner::entry` (legacy) or `<path::Owner>::entry` (v0)
fn is_entry(symbol: &str, owner: &str, entry: &str) -> bool {
    symbol
        .strip_suffix(entry)
        .and_then(|s| s.strip_suffix("::"))
        .map(|s| s.trim_end_matches('>'))
        .is_some_and(|s| s == owner || s.ends_with(&format!("::{}", owner)))
}

fn same_file(frame_file: &str, caller_file: &str) -> bool {
    let frame_file = frame_file.replace('\\', "/");
    let caller_file = caller_file.replace('\\', "/");
    let caller_file = caller_file.trim_start_matches("./");
    frame_file == caller_file || frame_file.ends_with(&format!("/{}", caller_file))
}

/// Symbol of the frame directly below the innermost `owner::entry` frame
fn caller_symbol(trace: &str, caller_file: &str, owner: &str, entry: &str) -> Option<String> {
    let frames = parse_frames(trace);
    let idx = frames.iter().position(|f| is_entry(f.symbol, owner, entry))?;
    let caller = frames.get(idx + 1)?;
    match caller.file {
        Some(file) if !same_file(file, caller_file) => None,
        _ => Some(caller.symbol.to_string()),
    }
}

fn strip_generics(segment: &str) -> &str {
    segment.split('<').next().unwrap_or(segment)
}

/// Type name for the segment preceding the function, if it names a type
fn owner_from_segment(segment: &str) -> Option<String> {
    // `<path::Type as path::Trait>`, or `<impl path::Trait for path::Type>` when
    // the impl lives away from both the type and the trait
    if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        let self_ty = match inner.strip_prefix("impl ") {
            Some(imp) => imp.rsplit(" for ").next().unwrap_or(imp),
            None => inner.split(" as ").next().unwrap_or(inner),
        };
        let last = split_path(self_ty).last().copied().unwrap_or(self_ty);
        return Some(strip_generics(last).to_string());
    }

    let name = strip_generics(segment);
    name.chars()
        .next()
        .filter(|c| c.is_uppercase())
        .map(|_| name.to_string())
}

/// Capture the current file and enclosing function as a `CallSite`
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::CallSite::from_path(file!(), __type_name_of(__f))
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at_level {
    ($level:ident, $svc:expr, $msg:expr) => {
        $svc.log_at(
            &$crate::call_site!(),
            $crate::LogLevel::$level,
            ::std::convert::AsRef::<str>::as_ref(&$msg),
            None,
            false,
        )
    };
    ($level:ident, $svc:expr, $msg:expr, $area:expr) => {
        $svc.log_at(
            &$crate::call_site!(),
            $crate::LogLevel::$level,
            ::std::convert::AsRef::<str>::as_ref(&$msg),
            Some(::std::convert::AsRef::<str>::as_ref(&$area)),
            false,
        )
    };
}

/// Log at System level with full call-site capture
#[macro_export]
macro_rules! log_system {
    ($($args:tt)+) => { $crate::__log_at_level!(System, $($args)+) };
}

/// Log at Error level with full call-site capture
#[macro_export]
macro_rules! log_error {
    ($($args:tt)+) => { $crate::__log_at_level!(Error, $($args)+) };
}

/// Log at Warn level with full call-site capture
#[macro_export]
macro_rules! log_warn {
    ($($args:tt)+) => { $crate::__log_at_level!(Warn, $($args)+) };
}

/// Log at Info level with full call-site capture
#[macro_export]
macro_rules! log_info {
    ($($args:tt)+) => { $crate::__log_at_level!(Info, $($args)+) };
}

/// Log at Debug level with full call-site capture
#[macro_export]
macro_rules! log_debug {
    ($($args:tt)+) => { $crate::__log_at_level!(Debug, $($args)+) };
}

/// Log at Trace level with full call-site capture
#[macro_export]
macro_rules! log_trace {
    ($($args:tt)+) => { $crate::__log_at_level!(Trace, $($args)+) };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sampler;

    impl Sampler {
        fn site(&self) -> CallSite {
            crate::call_site!()
        }

        fn site_from_stack(&self) -> CallSite {
            Sampler::entry()
        }

        #[track_caller]
        fn entry() -> CallSite {
            CallSite::from_backtrace(Location::caller(), "Sampler", "entry")
        }
    }

    trait Named {
        fn named_site(&self) -> CallSite;
    }

    impl Named for Sampler {
        fn named_site(&self) -> CallSite {
            crate::call_site!()
        }
    }

    fn free_site() -> CallSite {
        crate::call_site!()
    }

    // === Path parsing ===

    #[test]
    fn test_method_inside_type() {
        let site = CallSite::from_path("src/app.rs", "app::worker::Worker::run::__f");
        assert_eq!(site.owner.as_deref(), Some("Worker"));
        assert_eq!(site.function.as_deref(), Some("run"));
        assert_eq!(site.function_segment(), "<Worker::run> ");
    }

    #[test]
    fn test_free_function() {
        let site = CallSite::from_path("src/main.rs", "app::main::__f");
        assert_eq!(site.owner, None);
        assert_eq!(site.function_segment(), "<main> ");
    }

    #[test]
    fn test_trait_impl_path() {
        let site = CallSite::from_path(
            "src/lib.rs",
            "<app::model::Order as app::Persist>::save::{{closure}}::__f",
        );
        assert_eq!(site.owner.as_deref(), Some("Order"));
        assert_eq!(site.function.as_deref(), Some("save"));
    }

    #[test]
    fn test_detached_impl_path() {
        let site = CallSite::from_path(
            "src/lib.rs",
            "app::glue::<impl app::Persist for app::model::Order>::load::__f",
        );
        assert_eq!(site.owner.as_deref(), Some("Order"));
        assert_eq!(site.function.as_deref(), Some("load"));
    }

    #[test]
    fn test_generic_owner() {
        let site = CallSite::from_path("a.rs", "app::Cache<u32>::get::__f");
        assert_eq!(site.owner.as_deref(), Some("Cache"));
        assert_eq!(site.function.as_deref(), Some("get"));
    }

    #[test]
    fn test_short_file_strips_directories_only() {
        let site = CallSite::new("src/logging/service.rs", None, "f");
        assert_eq!(site.short_file(), "service.rs");

        let site = CallSite::new("C:\\work\\app\\main.rs", None, "f");
        assert_eq!(site.short_file(), "main.rs");

        let site = CallSite::new("plain.rs", None, "f");
        assert_eq!(site.short_file(), "plain.rs");
    }

    #[test]
    fn test_unknown_function_renders_nothing() {
        let site = CallSite::caller();
        assert!(site.function.is_none());
        assert_eq!(site.function_segment(), "");
        assert_eq!(site.short_file(), "caller.rs");
    }

    #[test]
    fn test_v0_closure_segments_dropped() {
        let site = CallSite::from_path("a.rs", "<app::Worker>::run::{closure#0}");
        assert_eq!(site.function_segment(), "<Worker::run> ");
    }

    // === Backtrace resolution ===

    const LEGACY_TRACE: &str = "\
   0: proclog::logging::caller::CallSite::from_backtrace
             at ./src/logging/caller.rs:60:21
   1: proclog::logging::service::LogService::emit_from_caller
             at ./src/logging/service.rs:420:24
   2: proclog::logging::service::LogService::info
             at ./src/logging/service.rs:350:9
   3: app::shop::Checkout::submit::h0123456789abcdef
             at /work/app/src/shop.rs:12:9
   4: app::main
             at /work/app/src/main.rs:5:5
";

    #[test]
    fn test_caller_below_entry_frame() {
        let symbol = caller_symbol(LEGACY_TRACE, "src/shop.rs", "LogService", "info").unwrap();
        assert_eq!(symbol, "app::shop::Checkout::submit");
        let site = CallSite::from_path("src/shop.rs", &symbol);
        assert_eq!(site.function_segment(), "<Checkout::submit> ");
    }

    #[test]
    fn test_caller_file_mismatch_is_rejected() {
        assert!(caller_symbol(LEGACY_TRACE, "src/other.rs", "LogService", "info").is_none());
        assert!(caller_symbol(LEGACY_TRACE, "src/shop.rs", "LogService", "warn").is_none());
    }

    #[test]
    fn test_v0_entry_and_inlined_caller() {
        let trace = "\
   0: <proclog::logging::service::LogService>::emit_from_caller
   1: <proclog::logging::service::LogService>::warn
      <app::Worker>::run::{closure#0}
             at src\\worker.rs:8:13
";
        let symbol = caller_symbol(trace, "src/worker.rs", "LogService", "warn").unwrap();
        let site = CallSite::from_path("src/worker.rs", &symbol);
        assert_eq!(site.function_segment(), "<Worker::run> ");
    }

    #[test]
    fn test_live_stack_resolves_calling_method() {
        let site = Sampler.site_from_stack();
        assert_eq!(site.short_file(), "caller.rs");
        assert_eq!(site.function_segment(), "<Sampler::site_from_stack> ");
    }

    // === Macro capture ===

    #[test]
    fn test_macro_inside_method() {
        let site = Sampler.site();
        assert_eq!(site.short_file(), "caller.rs");
        assert_eq!(site.function_segment(), "<Sampler::site> ");
    }

    #[test]
    fn test_macro_inside_trait_impl() {
        let site = Sampler.named_site();
        assert_eq!(site.function_segment(), "<Sampler::named_site> ");
    }

    #[test]
    fn test_macro_inside_free_function() {
        let site = free_site();
        assert_eq!(site.function_segment(), "<free_site> ");
    }
}
