//! Log adapters (sinks).
//!
//! # Responsibilities
//! - Define the capability every sink provides: a threshold and a write
//! - Provide the stock sinks: console, file, `tracing`, and a queued wrapper
//!
//! # Design Decisions
//! - Adapters receive the finished line; composition happens once, in the
//!   logger, not per sink
//! - `log` returns a `Result`; the logger isolates failures per adapter
//! - Adapters are shared as `Arc<dyn LogAdapter>` and must be `Send + Sync`

pub mod console;
pub mod file;
pub mod queued;
pub mod tracing_bridge;

use std::error::Error;
use std::fmt::Write;

use crate::error::Result;
use crate::level::Level;

pub use console::{ConsoleAdapter, ConsoleTarget};
pub use file::FileAdapter;
pub use queued::{BackpressurePolicy, QueuedAdapter};
pub use tracing_bridge::TracingAdapter;

/// An error attached to a log call.
pub type Cause<'a> = &'a (dyn Error + 'static);

/// A named destination for finished log lines.
pub trait LogAdapter: Send + Sync {
    /// Minimum level this adapter accepts.
    fn threshold(&self) -> Level;

    /// True iff `level` is at or above the threshold.
    fn is_loggable(&self, level: Level) -> bool {
        level >= self.threshold()
    }

    /// Writes one composed line.
    fn log(&self, level: Level, line: &str, cause: Option<Cause<'_>>) -> Result<()>;

    /// Pushes buffered output to the sink.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Renders a cause and its `source()` chain, one `Caused by:` line each.
pub fn render_cause(cause: Cause<'_>) -> String {
    let mut out = String::new();
    let mut current: Option<Cause<'_>> = Some(cause);
    while let Some(err) = current {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "Caused by: {}", err);
        current = err.source();
    }
    out
}

/// The line as a sink writes it: the composed line, then the cause chain.
pub fn render_line(line: &str, cause: Option<Cause<'_>>) -> String {
    match cause {
        Some(cause) => format!("{}\n{}\n", line, render_cause(cause)),
        None => format!("{}\n", line),
    }
}
