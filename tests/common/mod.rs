//! Shared adapters for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fanlog::{AdapterError, Cause, Level, LogAdapter, Result};

/// One delivered call.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub level: Level,
    pub line: String,
    pub cause: Option<String>,
}

/// Records every line it receives.
pub struct CaptureAdapter {
    threshold: Level,
    deliveries: Mutex<Vec<Delivery>>,
}

impl CaptureAdapter {
    pub fn new(threshold: Level) -> Arc<Self> {
        Arc::new(Self {
            threshold,
            deliveries: Mutex::new(Vec::new()),
        })
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.deliveries().into_iter().map(|d| d.line).collect()
    }

    pub fn count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

impl LogAdapter for CaptureAdapter {
    fn threshold(&self) -> Level {
        self.threshold
    }

    fn log(&self, level: Level, line: &str, cause: Option<Cause<'_>>) -> Result<()> {
        self.deliveries.lock().unwrap().push(Delivery {
            level,
            line: line.to_string(),
            cause: cause.map(|c| c.to_string()),
        });
        Ok(())
    }
}

/// Fails every write, counting attempts.
#[derive(Default)]
pub struct FailingAdapter {
    pub attempts: AtomicUsize,
}

impl LogAdapter for FailingAdapter {
    fn threshold(&self) -> Level {
        Level::TRACE
    }

    fn log(&self, _level: Level, _line: &str, _cause: Option<Cause<'_>>) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AdapterError::Sink("connection refused".to_string()))
    }
}

/// Panics on every write.
pub struct PanickingAdapter;

impl LogAdapter for PanickingAdapter {
    fn threshold(&self) -> Level {
        Level::TRACE
    }

    fn log(&self, _level: Level, _line: &str, _cause: Option<Cause<'_>>) -> Result<()> {
        panic!("sink exploded");
    }
}

/// Checks the `timestamp [LEVEL] thread caller: message` layout.
pub fn assert_line_shape(line: &str, level: &str, caller: &str, message: &str) {
    let (timestamp, rest) = line.split_at(23);
    assert_eq!(timestamp.len(), 23, "bad timestamp in {:?}", line);
    assert_eq!(&timestamp[4..5], "-", "bad timestamp in {:?}", line);
    assert_eq!(&timestamp[19..20], ".", "bad timestamp in {:?}", line);

    let prefix = format!(" [{}] ", level);
    assert!(rest.starts_with(&prefix), "bad level in {:?}", line);

    let suffix = format!(" {}: {}", caller, message);
    assert!(rest.ends_with(&suffix), "expected {:?} in {:?}", suffix, line);
}
