//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! logging.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggingConfig (validated, immutable)
//!     → build_adapters (one registry entry per adapter, queue-wrapped if asked)
//!     → LoggerFactory::apply_config (single registry swap)
//!
//! On change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → apply_config swaps the adapter set; live loggers pick it up
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A bad reload keeps the current adapter set

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

use std::sync::Arc;

use thiserror::Error;

use crate::adapter::{ConsoleAdapter, FileAdapter, LogAdapter, QueuedAdapter, TracingAdapter};
use crate::error::AdapterError;
use crate::registry::AdapterEntry;

pub use loader::{load_config, parse_config};
pub use schema::{AdapterConfig, AdapterKind, LoggingConfig, QueueConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;

/// Error type for configuration loading and application.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("Adapter `{name}` could not be built: {source}")]
    Adapter {
        name: String,
        #[source]
        source: AdapterError,
    },
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the registry entries described by `config`, in file order.
pub fn build_adapters(config: &LoggingConfig) -> Result<Vec<AdapterEntry>, ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)?;

    config
        .adapters
        .iter()
        .map(|adapter| {
            let built = build_adapter(adapter, config).map_err(|source| ConfigError::Adapter {
                name: adapter.name.clone(),
                source,
            })?;
            Ok(AdapterEntry {
                name: Arc::from(adapter.name.trim()),
                adapter: built,
            })
        })
        .collect()
}

fn build_adapter(
    adapter: &AdapterConfig,
    config: &LoggingConfig,
) -> Result<Arc<dyn LogAdapter>, AdapterError> {
    let threshold = adapter.threshold.unwrap_or(config.defaults.threshold);

    let sink: Arc<dyn LogAdapter> = match adapter.kind {
        AdapterKind::Console => Arc::new(ConsoleAdapter::with_target(threshold, adapter.target)),
        AdapterKind::Tracing => Arc::new(TracingAdapter::new(threshold)),
        AdapterKind::File => {
            let path = adapter
                .path
                .as_ref()
                .ok_or_else(|| AdapterError::Sink("file adapter without path".to_string()))?;
            Arc::new(FileAdapter::open(path, threshold)?)
        }
    };

    match &adapter.queue {
        Some(queue) => Ok(Arc::new(QueuedAdapter::new(
            adapter.name.trim(),
            sink,
            queue.capacity,
            queue.policy,
        )?)),
        None => Ok(sink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use tempfile::tempdir;

    #[test]
    fn test_build_adapters_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("service.log");
        let config = parse_config(&format!(
            r#"
            [[adapters]]
            name = "console"
            kind = "console"

            [[adapters]]
            name = "file"
            kind = "file"
            threshold = "error"
            path = "{}"
            queue = {{ capacity = 4 }}
            "#,
            path.display()
        ))
        .unwrap();

        let entries = build_adapters(&config).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(&*entries[0].name, "console");
        assert_eq!(entries[0].adapter.threshold(), Level::INFO);
        assert_eq!(&*entries[1].name, "file");
        assert_eq!(entries[1].adapter.threshold(), Level::ERROR);
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_file_reports_adapter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("service.log");
        let config = LoggingConfig {
            adapters: vec![AdapterConfig {
                name: "file".into(),
                kind: AdapterKind::File,
                threshold: None,
                target: Default::default(),
                path: Some(path),
                queue: None,
            }],
            ..Default::default()
        };

        match build_adapters(&config) {
            Err(ConfigError::Adapter { name, .. }) => assert_eq!(name, "file"),
            other => panic!("Expected ConfigError::Adapter, got {:?}", other.map(|e| e.len())),
        }
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::DuplicateName("a".into()),
            ValidationError::MissingPath("b".into()),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: adapter name `a` is used more than once, file adapter `b` has no path"
        );
    }
}
