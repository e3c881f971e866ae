//! Bounded-queue wrapper that moves sink I/O off the logging thread.
//!
//! # Design Decisions
//! - One worker thread per wrapped adapter drains a bounded channel, so
//!   lines from one logger reach the sink in the order they were logged
//! - The backpressure policy is explicit: `Block` waits for room, `Drop`
//!   discards and counts
//! - Causes are rendered to text before enqueueing; the worker never sees
//!   borrowed errors
//! - Dropping the adapter closes the queue and joins the worker after it has
//!   drained what was already queued

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};

use crate::adapter::{render_cause, Cause, LogAdapter};
use crate::error::{AdapterError, Result};
use crate::level::Level;

/// What to do when the queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackpressurePolicy {
    /// Wait until the worker frees a slot.
    #[default]
    Block,
    /// Discard the line and count it.
    Drop,
}

enum Job {
    Line { level: Level, text: String },
    Flush(SyncSender<()>),
}

/// Wraps an adapter with a bounded queue and a dedicated writer thread.
pub struct QueuedAdapter {
    name: String,
    inner: Arc<dyn LogAdapter>,
    capacity: usize,
    policy: BackpressurePolicy,
    sender: Mutex<Option<SyncSender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    dropped: AtomicU64,
}

impl QueuedAdapter {
    /// Spawns the worker thread for `inner`.
    ///
    /// # Errors
    ///
    /// Returns error if the worker thread cannot be spawned.
    pub fn new(
        name: impl Into<String>,
        inner: Arc<dyn LogAdapter>,
        capacity: usize,
        policy: BackpressurePolicy,
    ) -> Result<Self> {
        let name = name.into();
        let capacity = capacity.max(1);
        let (sender, receiver) = sync_channel(capacity);

        let worker_inner = inner.clone();
        let worker_name = name.clone();
        let worker = thread::Builder::new()
            .name(format!("fanlog-queue-{}", name))
            .spawn(move || run_worker(&worker_name, worker_inner, receiver))?;

        Ok(Self {
            name,
            inner,
            capacity,
            policy,
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            dropped: AtomicU64::new(0),
        })
    }

    pub fn policy(&self) -> BackpressurePolicy {
        self.policy
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines discarded under [`BackpressurePolicy::Drop`].
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stops accepting lines, drains the queue and joins the worker.
    pub fn close(&self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
        let handle = self.worker.lock().ok().and_then(|mut worker| worker.take());
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::error!(adapter = %self.name, "Queue worker panicked");
            }
        }
    }

    fn send(&self, job: Job) -> Result<()> {
        let guard = self
            .sender
            .lock()
            .map_err(|_| AdapterError::Closed(self.name.clone()))?;
        let sender = guard
            .as_ref()
            .ok_or_else(|| AdapterError::Closed(self.name.clone()))?;

        match self.policy {
            BackpressurePolicy::Block => sender
                .send(job)
                .map_err(|_| AdapterError::Closed(self.name.clone())),
            BackpressurePolicy::Drop => match sender.try_send(job) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(_)) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    Err(AdapterError::QueueFull {
                        capacity: self.capacity,
                    })
                }
                Err(TrySendError::Disconnected(_)) => Err(AdapterError::Closed(self.name.clone())),
            },
        }
    }
}

impl LogAdapter for QueuedAdapter {
    fn threshold(&self) -> Level {
        self.inner.threshold()
    }

    fn is_loggable(&self, level: Level) -> bool {
        self.inner.is_loggable(level)
    }

    fn log(&self, level: Level, line: &str, cause: Option<Cause<'_>>) -> Result<()> {
        let text = match cause {
            Some(cause) => format!("{}\n{}", line, render_cause(cause)),
            None => line.to_string(),
        };
        self.send(Job::Line { level, text })
    }

    /// Waits until every line queued so far has been written.
    fn flush(&self) -> Result<()> {
        let (ack, done) = sync_channel(1);
        {
            let guard = self
                .sender
                .lock()
                .map_err(|_| AdapterError::Closed(self.name.clone()))?;
            let sender = guard
                .as_ref()
                .ok_or_else(|| AdapterError::Closed(self.name.clone()))?;
            sender
                .send(Job::Flush(ack))
                .map_err(|_| AdapterError::Closed(self.name.clone()))?;
        }
        done.recv().map_err(|_| AdapterError::Closed(self.name.clone()))
    }
}

impl Drop for QueuedAdapter {
    fn drop(&mut self) {
        self.close();
    }
}

fn run_worker(name: &str, inner: Arc<dyn LogAdapter>, receiver: Receiver<Job>) {
    tracing::debug!(adapter = %name, "Queue worker started");
    for job in receiver {
        match job {
            Job::Line { level, text } => {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| inner.log(level, &text, None)));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::warn!(adapter = %name, error = %e, "Queued write failed"),
                    Err(_) => tracing::warn!(adapter = %name, "Queued write panicked"),
                }
            }
            Job::Flush(ack) => {
                if let Err(e) = inner.flush() {
                    tracing::warn!(adapter = %name, error = %e, "Queued flush failed");
                }
                let _ = ack.send(());
            }
        }
    }
    if let Err(e) = inner.flush() {
        tracing::warn!(adapter = %name, error = %e, "Final flush failed");
    }
    tracing::debug!(adapter = %name, "Queue worker stopped");
}
