//! Fan-out logging facility for network services.
//!
//! # Architecture Overview
//!
//! ```text
//!   component code
//!        │  info!(logger, "Serving on {} port {}", addr, port)
//!        ▼
//!   ┌──────────┐   format.rs   placeholder substitution
//!   │  Logger  │── caller.rs   Class#method from the call site
//!   │ (per     │── record.rs   "ts [LEVEL] thread caller: message"
//!   │  name)   │
//!   └────┬─────┘
//!        │ registry snapshot, registration order
//!        ▼
//!   ┌─────────────────┐    is_loggable(level)?   ┌─────────────────────────┐
//!   │ AdapterRegistry │ ───────────────────────▶ │ console / file / tracing│
//!   └─────────────────┘                          │ (optionally queued)     │
//!        ▲                                       └─────────────────────────┘
//!        │ register / unregister / apply_config
//!   ┌───────────────┐
//!   │ LoggerFactory │ ◀── config (TOML, hot reload)
//!   └───────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fanlog::{info, ConsoleAdapter, Level, LoggerFactory};
//!
//! let factory = LoggerFactory::new();
//! factory.register_adapter("console", Arc::new(ConsoleAdapter::new(Level::INFO)));
//!
//! let logger = factory.get_logger("app.http.HttpWebServer");
//! info!(logger, "Serving Http on {} port {}", "0.0.0.0", 8080);
//! ```

pub mod adapter;
pub mod caller;
pub mod config;
pub mod error;
pub mod factory;
pub mod format;
pub mod level;
pub mod logger;
mod macros;
pub mod record;
pub mod registry;

pub use adapter::{
    BackpressurePolicy, Cause, ConsoleAdapter, ConsoleTarget, FileAdapter, LogAdapter,
    QueuedAdapter, TracingAdapter,
};
pub use caller::{CallSite, CallerResolver, FACADE_FRAME_DEPTH};
pub use config::{ConfigError, ConfigWatcher, LoggingConfig};
pub use error::{AdapterError, Result};
pub use factory::LoggerFactory;
pub use level::{Level, LevelTable};
pub use logger::Logger;
pub use registry::AdapterRegistry;
