//! Per-component logging facade.
//!
//! # Data Flow
//! ```text
//! log(level, template, args)
//!     → format.rs (placeholder substitution)
//!     → caller.rs (Class#method, or the logger's short name)
//!     → [per-logger lock] stamp time, compose line
//!     → registry snapshot, in registration order
//!     → adapter.is_loggable(level) ? adapter.log(level, line, cause)
//! ```
//!
//! # Design Decisions
//! - One mutex per logger serializes composition and fan-out, so lines from
//!   one logger reach every sink in call order
//! - Fan-out runs inside that lock: a slow sink stalls later calls on the
//!   same logger (not on other loggers). Wrap such sinks in `QueuedAdapter`
//! - Adapter errors and panics are contained per adapter and reported through
//!   `tracing`; the caller never sees them

use std::borrow::Cow;
use std::fmt::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use chrono::Local;

use crate::adapter::Cause;
use crate::caller::{short_name, CallSite, CallerResolver};
use crate::format::{self, Arg};
use crate::level::Level;
use crate::record::{LogRecord, TIMESTAMP_FORMAT};
use crate::registry::AdapterRegistry;

/// Buffers reused across calls; only touched under the logger's lock.
#[derive(Default)]
struct LineBuffer {
    timestamp: String,
    line: String,
}

/// Logging facade bound to one component name.
pub struct Logger {
    name: String,
    short_name: String,
    registry: Arc<AdapterRegistry>,
    resolver: CallerResolver,
    buffer: Mutex<LineBuffer>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .finish()
    }
}

impl Logger {
    /// Creates a logger that fans out to `registry`.
    pub fn new(name: impl Into<String>, registry: Arc<AdapterRegistry>) -> Self {
        Self::with_resolver(name, registry, CallerResolver::new())
    }

    pub fn with_resolver(
        name: impl Into<String>,
        registry: Arc<AdapterRegistry>,
        resolver: CallerResolver,
    ) -> Self {
        let name = name.into();
        let short_name = short_name(&name).to_string();
        Self {
            name,
            short_name,
            registry,
            resolver,
            buffer: Mutex::new(LineBuffer::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last segment of the name: `com.example.Foo` → `Foo`.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// True if at least one registered adapter admits `level`.
    pub fn is_enabled(&self, level: Level) -> bool {
        self.registry
            .with_entries(|entries| entries.iter().any(|e| e.adapter.is_loggable(level)))
    }

    /// Formats `template` and dispatches it. Lines are labelled with the
    /// logger's short name; use the macros to get `Class#method`.
    pub fn log(&self, level: Level, template: &str, args: &[Arg<'_>]) {
        self.dispatch(None, level, template, args, None);
    }

    /// Dispatches `message` verbatim with an optional cause.
    pub fn log_cause(&self, level: Level, message: &str, cause: Option<Cause<'_>>) {
        self.dispatch(None, level, message, &[], cause);
    }

    /// [`Logger::log`] with a captured call site.
    pub fn log_at(&self, site: &CallSite, level: Level, template: &str, args: &[Arg<'_>]) {
        self.dispatch(Some(site), level, template, args, None);
    }

    /// [`Logger::log_cause`] with a captured call site.
    pub fn log_cause_at(
        &self,
        site: &CallSite,
        level: Level,
        message: &str,
        cause: Option<Cause<'_>>,
    ) {
        self.dispatch(Some(site), level, message, &[], cause);
    }

    pub fn trace(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::TRACE, template, args);
    }

    pub fn debug(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::DEBUG, template, args);
    }

    pub fn info(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::INFO, template, args);
    }

    pub fn warn(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::WARN, template, args);
    }

    pub fn error(&self, template: &str, args: &[Arg<'_>]) {
        self.log(Level::ERROR, template, args);
    }

    fn dispatch(
        &self,
        site: Option<&CallSite>,
        level: Level,
        template: &str,
        args: &[Arg<'_>],
        cause: Option<Cause<'_>>,
    ) {
        let snapshot = self.registry.all();
        if !snapshot.iter().any(|e| admits(&e.name, &*e.adapter, level)) {
            return;
        }

        let message: Cow<'_, str> = if args.is_empty() {
            Cow::Borrowed(template)
        } else {
            Cow::Owned(format::format(template, args))
        };
        let caller = self.resolver.label(site);
        let caller = caller.as_deref().unwrap_or(self.short_name.as_str());
        let current = thread::current();
        let thread_name: Cow<'_, str> = match current.name() {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("{:?}", current.id())),
        };

        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        let LineBuffer { timestamp, line } = &mut *buffer;

        timestamp.clear();
        let _ = write!(timestamp, "{}", Local::now().format(TIMESTAMP_FORMAT));

        let record = LogRecord {
            timestamp: timestamp.as_str(),
            level,
            thread_name: &thread_name,
            caller,
            message: &message,
            cause,
        };
        line.clear();
        record.compose_into(line);

        for entry in snapshot.iter() {
            if !admits(&entry.name, &*entry.adapter, level) {
                continue;
            }
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| entry.adapter.log(level, line.as_str(), record.cause)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!(
                    adapter = %entry.name,
                    logger = %self.name,
                    error = %e,
                    "Adapter failed to write log line"
                ),
                Err(_) => tracing::warn!(
                    adapter = %entry.name,
                    logger = %self.name,
                    "Adapter panicked while writing log line"
                ),
            }
        }
    }
}

/// Threshold check that survives a panicking adapter.
fn admits(name: &str, adapter: &dyn crate::adapter::LogAdapter, level: Level) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| adapter.is_loggable(level))) {
        Ok(admitted) => admitted,
        Err(_) => {
            tracing::warn!(adapter = %name, "Adapter panicked in threshold check");
            false
        }
    }
}
