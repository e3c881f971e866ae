//! Adapter that forwards lines into the `tracing` ecosystem.

use crate::adapter::{render_cause, Cause, LogAdapter};
use crate::error::Result;
use crate::level::Level;

/// Re-emits each composed line as a `tracing` event at the mapped level.
///
/// Ordinals between the built-in levels map down to the nearest one below;
/// anything above `ERROR` is emitted as an error.
#[derive(Debug, Clone, Copy)]
pub struct TracingAdapter {
    threshold: Level,
}

impl TracingAdapter {
    pub fn new(threshold: Level) -> Self {
        Self { threshold }
    }
}

impl LogAdapter for TracingAdapter {
    fn threshold(&self) -> Level {
        self.threshold
    }

    fn log(&self, level: Level, line: &str, cause: Option<Cause<'_>>) -> Result<()> {
        let cause = cause.map(render_cause);
        let cause = cause.as_deref();
        match to_tracing(level) {
            tracing::Level::ERROR => tracing::error!(target: "fanlog", cause, "{}", line),
            tracing::Level::WARN => tracing::warn!(target: "fanlog", cause, "{}", line),
            tracing::Level::INFO => tracing::info!(target: "fanlog", cause, "{}", line),
            tracing::Level::DEBUG => tracing::debug!(target: "fanlog", cause, "{}", line),
            _ => tracing::trace!(target: "fanlog", cause, "{}", line),
        }
        Ok(())
    }
}

fn to_tracing(level: Level) -> tracing::Level {
    if level >= Level::ERROR {
        tracing::Level::ERROR
    } else if level >= Level::WARN {
        tracing::Level::WARN
    } else if level >= Level::INFO {
        tracing::Level::INFO
    } else if level >= Level::DEBUG {
        tracing::Level::DEBUG
    } else {
        tracing::Level::TRACE
    }
}
