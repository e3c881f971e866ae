//! Per-call log record and line composition.

use std::fmt::Write;

use crate::adapter::Cause;
use crate::level::Level;

/// Timestamp layout of a composed line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Everything one log call produces. Built fresh per call and dropped after
/// dispatch.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub timestamp: &'a str,
    pub level: Level,
    pub thread_name: &'a str,
    /// `Class#method`, or the logger's short name.
    pub caller: &'a str,
    pub message: &'a str,
    pub cause: Option<Cause<'a>>,
}

impl LogRecord<'_> {
    /// Appends `timestamp [LEVEL] thread caller: message` to `out`.
    pub fn compose_into(&self, out: &mut String) {
        out.push_str(self.timestamp);
        out.push_str(" [");
        let _ = write!(out, "{}", self.level);
        out.push_str("] ");
        out.push_str(self.thread_name);
        out.push(' ');
        out.push_str(self.caller);
        out.push_str(": ");
        out.push_str(self.message);
    }

    pub fn compose(&self) -> String {
        let mut out = String::with_capacity(
            self.timestamp.len() + self.thread_name.len() + self.caller.len() + self.message.len() + 16,
        );
        self.compose_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(level: Level, caller: &'a str) -> LogRecord<'a> {
        LogRecord {
            timestamp: "2024-05-01 12:00:00.000",
            level,
            thread_name: "worker-1",
            caller,
            message: "accepted connection",
            cause: None,
        }
    }

    #[test]
    fn test_composition_order() {
        assert_eq!(
            record(Level::INFO, "Acceptor#run").compose(),
            "2024-05-01 12:00:00.000 [INFO] worker-1 Acceptor#run: accepted connection"
        );
    }

    #[test]
    fn test_unknown_level_uses_number() {
        let line = record(Level(9), "Server").compose();
        assert!(line.contains(" [9] worker-1 Server: "));
    }

    #[test]
    fn test_compose_into_appends() {
        let mut out = String::from(">");
        record(Level::WARN, "Server").compose_into(&mut out);
        assert!(out.starts_with(">2024-05-01"));
    }
}
