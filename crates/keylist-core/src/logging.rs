//! Logging facilities for keylist.
//!
//! keylist uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("keylist=debug,keylist_core=trace")
//!         .init();
//! }
//! ```
//!
//! The [`targets`] and [`span_names`] modules hold the names used by every
//! crate in the workspace so that filters stay stable across releases.

/// Span names used throughout keylist for tracing.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "keylist::signal";
    /// Full sort pass over a list.
    pub const SORT: &str = "keylist::sort";
    /// Linear attribute search.
    pub const FIND: &str = "keylist::find";
}

/// Log targets, one per subsystem.
///
/// Usable directly in `EnvFilter` directives, e.g. `keylist::model=debug`.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "keylist_core";
    /// Slot connection and emission.
    pub const SIGNAL: &str = "keylist_core::signal";
    /// Model (sortable list) target.
    pub const MODEL: &str = "keylist::model";
    /// Performance spans.
    pub const PERF: &str = "keylist::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations such as a full
/// re-sort.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enters a `perf` span named after `name` until the guard drops.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "keylist::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }

    /// Create a performance span that also records how many items it covers.
    pub fn with_len(name: &'static str, len: usize) -> Self {
        let span = tracing::info_span!(target: "keylist::perf", "perf", operation = name, len);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level log with the model target.
#[macro_export]
macro_rules! keylist_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "keylist::model", $($arg)*)
    };
}

/// Debug-level log with the model target.
#[macro_export]
macro_rules! keylist_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "keylist::model", $($arg)*)
    };
}
