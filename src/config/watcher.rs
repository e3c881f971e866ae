//! Configuration file watcher for hot reload of the adapter set.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::load_config;
use crate::factory::LoggerFactory;

/// Watches a logging configuration file and re-applies it to a factory.
pub struct ConfigWatcher {
    path: PathBuf,
    factory: Arc<LoggerFactory>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, factory: Arc<LoggerFactory>) -> Self {
        Self {
            path: path.to_path_buf(),
            factory,
        }
    }

    /// Loads the file and applies it. A failed reload keeps the current
    /// adapters; returns whether the new configuration took effect.
    pub fn reload(&self) -> bool {
        reload(&self.path, &self.factory)
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let factory = self.factory.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Logging config change detected, reloading...");
                        reload(&path, &factory);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Logging config watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, factory: &LoggerFactory) -> bool {
    let applied = load_config(path).and_then(|config| factory.apply_config(&config));
    match applied {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                "Failed to reload logging config: {}. Keeping current adapters.",
                e
            );
            false
        }
    }
}
