//! Error types.
//!
//! None of these ever reach a caller of `Logger::log`; they describe sink and
//! configuration failures.

use thiserror::Error;

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors an adapter can raise while writing.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// I/O error from the underlying sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink has been shut down.
    #[error("adapter `{0}` is closed")]
    Closed(String),

    /// A bounded queue rejected the line.
    #[error("queue full, line dropped ({capacity} pending)")]
    QueueFull { capacity: usize },

    /// Any other sink-specific failure.
    #[error("sink error: {0}")]
    Sink(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_adapter_error_display() {
        let err = AdapterError::Sink("remote refused".to_string());
        assert_eq!(err.to_string(), "sink error: remote refused");

        let err = AdapterError::QueueFull { capacity: 8 };
        assert_eq!(err.to_string(), "queue full, line dropped (8 pending)");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = Error::new(ErrorKind::NotFound, "file not found");
        let err: AdapterError = io_err.into();

        match err {
            AdapterError::Io(_) => {}
            _ => panic!("Expected AdapterError::Io"),
        }
    }
}
