use thiserror::Error;

/// Errors raised by a key-value storage medium.
#[derive(Debug, Error)]
pub enum MediumError {
    #[error("storage medium unavailable: {0}")]
    Unavailable(String),

    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors for a website draft at the CLI/API boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("title cannot be empty")]
    EmptyTitle,
}

/// Errors from website store writes.
///
/// Reads never fail: unreadable or corrupted data degrades to an empty table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage medium error: {0}")]
    Medium(#[from] MediumError),

    #[error("serialization error: {0}")]
    Serialization(String),
}
