//! Logger factory: the composition root of the logging facility.
//!
//! # Responsibilities
//! - Own the adapter registry shared by every logger it hands out
//! - Cache one logger per name
//! - Build the adapter set from configuration
//!
//! # Design Decisions
//! - An explicit object, constructed once by the process and passed to the
//!   components that need loggers; no process-global state
//! - Loggers hold an `Arc` of the registry, so adapter changes apply to
//!   loggers that were created earlier

use std::sync::Arc;

use dashmap::DashMap;

use crate::adapter::LogAdapter;
use crate::caller::CallerResolver;
use crate::config::schema::LoggingConfig;
use crate::config::{build_adapters, ConfigError};
use crate::logger::Logger;
use crate::registry::AdapterRegistry;

/// Hands out cached loggers that share one adapter registry.
pub struct LoggerFactory {
    registry: Arc<AdapterRegistry>,
    loggers: DashMap<String, Arc<Logger>>,
    resolver: CallerResolver,
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerFactory {
    /// Factory with an empty registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(AdapterRegistry::new()))
    }

    pub fn with_registry(registry: Arc<AdapterRegistry>) -> Self {
        Self {
            registry,
            loggers: DashMap::new(),
            resolver: CallerResolver::new(),
        }
    }

    /// Factory whose loggers skip `resolver.skip()` facade frames, for
    /// callers that wrap the macros in a facade of their own.
    pub fn with_resolver(mut self, resolver: CallerResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Factory with the adapters described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if an adapter cannot be built (e.g. a log file cannot
    /// be opened).
    pub fn from_config(config: &LoggingConfig) -> Result<Self, ConfigError> {
        let factory = Self::new();
        factory.apply_config(config)?;
        Ok(factory)
    }

    /// Replaces the whole adapter set with the one described by `config`.
    ///
    /// The registry is swapped in one step; on error it is left unchanged.
    pub fn apply_config(&self, config: &LoggingConfig) -> Result<(), ConfigError> {
        let entries = build_adapters(config)?;
        let count = entries.len();
        self.registry.replace_all(entries);
        tracing::info!(adapters = count, "Logging configuration applied");
        Ok(())
    }

    /// Returns the logger bound to `name`, creating it on first use.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.get(name) {
            return logger.value().clone();
        }
        self.loggers
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(Logger::with_resolver(
                    name,
                    self.registry.clone(),
                    self.resolver,
                ))
            })
            .value()
            .clone()
    }

    /// Logger named after a Rust type, e.g. `get_logger_for::<Server>()`.
    pub fn get_logger_for<T: ?Sized>(&self) -> Arc<Logger> {
        self.get_logger(std::any::type_name::<T>())
    }

    /// Adds or replaces the adapter registered under `name`.
    pub fn register_adapter(
        &self,
        name: impl Into<Arc<str>>,
        adapter: Arc<dyn LogAdapter>,
    ) -> Option<Arc<dyn LogAdapter>> {
        self.registry.register(name, adapter)
    }

    pub fn unregister_adapter(&self, name: &str) -> Option<Arc<dyn LogAdapter>> {
        self.registry.unregister(name)
    }

    pub fn registry(&self) -> &Arc<AdapterRegistry> {
        &self.registry
    }

    /// Number of cached loggers.
    pub fn logger_count(&self) -> usize {
        self.loggers.len()
    }

    /// Flushes every registered adapter, reporting failures via `tracing`.
    pub fn flush(&self) {
        for entry in self.registry.all().iter() {
            if let Err(e) = entry.adapter.flush() {
                tracing::warn!(adapter = %entry.name, error = %e, "Adapter flush failed");
            }
        }
    }
}
