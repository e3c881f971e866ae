//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::adapter::{BackpressurePolicy, ConsoleTarget};
use crate::level::Level;

/// Root logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Values used when an adapter leaves them out.
    pub defaults: DefaultsConfig,

    /// Adapters in fan-out order.
    pub adapters: Vec<AdapterConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Threshold for adapters without their own.
    pub threshold: Level,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            threshold: Level::INFO,
        }
    }
}

/// Sink implementation behind an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    Console,
    File,
    Tracing,
}

/// One adapter entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdapterConfig {
    /// Registry name; unique within the file.
    pub name: String,

    pub kind: AdapterKind,

    /// Minimum level; falls back to `defaults.threshold`.
    #[serde(default)]
    pub threshold: Option<Level>,

    /// Console stream selection (console only).
    #[serde(default)]
    pub target: ConsoleTarget,

    /// Log file path (file only, required there).
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Moves writes to a worker thread behind a bounded queue.
    #[serde(default)]
    pub queue: Option<QueueConfig>,
}

/// Bounded queue settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum pending lines.
    pub capacity: usize,

    /// Behaviour when full.
    pub policy: BackpressurePolicy,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            policy: BackpressurePolicy::Block,
        }
    }
}
