//! Worker Errors

use thiserror::Error;

/// Errors raised by the worker core or reported by its host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Install failed: {0}")]
    Install(String),

    #[error("Offline and no cached fallback for {0}")]
    Offline(String),

    #[error("Host error: {0}")]
    Host(String),
}

/// Common result type for worker operations
pub type WorkerResult<T> = Result<T, WorkerError>;
