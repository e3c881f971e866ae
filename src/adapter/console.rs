//! Console sink.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::adapter::{render_line, Cause, LogAdapter};
use crate::error::Result;
use crate::level::Level;

/// Which standard stream a console adapter writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
    /// WARN and above to stderr, the rest to stdout.
    #[default]
    Split,
}

impl ConsoleTarget {
    fn is_stderr(self, level: Level) -> bool {
        match self {
            ConsoleTarget::Stdout => false,
            ConsoleTarget::Stderr => true,
            ConsoleTarget::Split => level >= Level::WARN,
        }
    }
}

/// Writes lines to stdout/stderr.
#[derive(Debug, Clone)]
pub struct ConsoleAdapter {
    threshold: Level,
    target: ConsoleTarget,
}

impl ConsoleAdapter {
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            target: ConsoleTarget::default(),
        }
    }

    pub fn with_target(threshold: Level, target: ConsoleTarget) -> Self {
        Self { threshold, target }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl LogAdapter for ConsoleAdapter {
    fn threshold(&self) -> Level {
        self.threshold
    }

    fn log(&self, level: Level, line: &str, cause: Option<Cause<'_>>) -> Result<()> {
        let text = render_line(line, cause);
        if self.target.is_stderr(level) {
            io::stderr().lock().write_all(text.as_bytes())?;
        } else {
            io::stdout().lock().write_all(text.as_bytes())?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_routes_by_level() {
        assert!(!ConsoleTarget::Split.is_stderr(Level::INFO));
        assert!(ConsoleTarget::Split.is_stderr(Level::WARN));
        assert!(ConsoleTarget::Stderr.is_stderr(Level::TRACE));
        assert!(!ConsoleTarget::Stdout.is_stderr(Level::ERROR));
    }

    #[test]
    fn test_console_writes() {
        let adapter = ConsoleAdapter::with_target(Level::DEBUG, ConsoleTarget::Stdout);
        assert!(adapter.log(Level::INFO, "console smoke line", None).is_ok());
        assert!(adapter.flush().is_ok());
        assert!(!adapter.is_loggable(Level::TRACE));
    }
}
