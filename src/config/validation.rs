//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic, including level names)
//! - Unique, non-empty adapter names
//! - Required per-kind settings (file adapters need a path)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: LoggingConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{AdapterKind, LoggingConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("adapter #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("adapter name `{0}` is used more than once")]
    DuplicateName(String),

    #[error("file adapter `{0}` has no path")]
    MissingPath(String),

    #[error("adapter `{0}` has a queue with zero capacity")]
    ZeroCapacity(String),
}

/// Checks `config`, collecting every problem found.
pub fn validate_config(config: &LoggingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, adapter) in config.adapters.iter().enumerate() {
        let name = adapter.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateName(name.to_string()));
        }

        if adapter.kind == AdapterKind::File && adapter.path.is_none() {
            errors.push(ValidationError::MissingPath(adapter.name.clone()));
        }

        if matches!(&adapter.queue, Some(queue) if queue.capacity == 0) {
            errors.push(ValidationError::ZeroCapacity(adapter.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
