use ludex_types::GameId;

/// Errors from record and image store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No entry with the given id exists.
    #[error("game not found: {0}")]
    NotFound(GameId),

    /// An add was attempted before any image blob was resolved.
    #[error("no image attached")]
    MissingImage,

    /// A required field was empty or out of range.
    #[error("invalid field: {0}")]
    Validation(String),

    /// A blob name that does not stay inside the image directory.
    #[error("invalid image name: {0}")]
    InvalidImageName(String),

    /// Snapshot serialization or parsing failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
