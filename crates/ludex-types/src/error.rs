use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid game id: {0}")]
    InvalidId(String),

    #[error("unknown status: {0}")]
    UnknownStatus(String),
}
