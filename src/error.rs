//! Error types for the toggle core.

use thiserror::Error;

/// Failures surfaced by the event coordinator.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// The input was not a parseable absolute URL with a real origin.
    #[error("not an absolute URL: {0:?}")]
    InvalidUrl(String),

    /// The host delivered a click with no usable tab URL and no origin has
    /// been resolved yet in this worker.
    #[error("tab has no URL and no origin is known yet")]
    MissingUrl,

    /// The persisted store could not be read or written. Stored state is
    /// left as it was.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A failed read or write against the host key-value store.
#[derive(Debug, Error)]
#[error("storage unavailable: {message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> StorageError {
        StorageError {
            message: message.into(),
        }
    }
}
