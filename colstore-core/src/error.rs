//! Error types for Colstore

use crate::footer::FooterError;
use thiserror::Error;

/// Result type alias for Colstore operations
pub type Result<T> = std::result::Result<T, ColstoreError>;

/// Colstore error types
#[derive(Error, Debug)]
pub enum ColstoreError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file path does not follow the data file naming layout
    #[error("Malformed data file path: {0}")]
    MalformedPath(String),

    /// Reading the footer of a block failed
    #[error("Failed to read footer of {path}: {source}")]
    FooterRead {
        path: String,
        #[source]
        source: FooterError,
    },

    /// The metadata registry has no entry for the table key
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// The table is registered but carries no table identifier
    #[error("Table {0} has no table identifier")]
    NoTableIdentifier(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ColstoreError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ColstoreError::Io(_) => true,
            ColstoreError::FooterRead { source, .. } => matches!(source, FooterError::Io(_)),
            _ => false,
        }
    }

    /// Check if error indicates corruption
    pub fn is_corruption(&self) -> bool {
        match self {
            ColstoreError::FooterRead { source, .. } => source.is_corruption(),
            _ => false,
        }
    }
}
