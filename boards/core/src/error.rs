//! Errors surfaced by board detection.
//!
//! Detection itself never fails: missing fields and unreadable files resolve
//! to "no match". Errors are reserved for caller mistakes and explicit reads.

/// Errors that can occur while querying boards
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Board identifier is not one of the known boards
    #[error("{0} is not a defined board")]
    UnknownBoard(String),

    /// Generic IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
