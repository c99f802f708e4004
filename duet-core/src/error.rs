//! Error types for Duet Core

use thiserror::Error;

/// Result type alias using DuetError
pub type Result<T> = std::result::Result<T, DuetError>;

/// Top-level error type for all Duet operations
#[derive(Debug, Error)]
pub enum DuetError {
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    #[error("Invalid destination path: {0}")]
    InvalidDestination(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the shape of the chapter text handed to the exporter
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(
        "chapter {chapter}: original has {original_lines} lines but translation has {translation_lines}"
    )]
    ContentMismatch {
        chapter: usize,
        original_lines: usize,
        translation_lines: usize,
    },
}

/// Errors raised while building or persisting the archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Zip failure: {0}")]
    Zip(String),

    #[error("Failed to persist archive: {0}")]
    Persist(std::io::Error),
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(error: zip::result::ZipError) -> Self {
        ArchiveError::Zip(error.to_string())
    }
}

/// Errors from the identifier arithmetic
#[derive(Debug, Error)]
pub enum IdentifierError {
    #[error("Empty digit string")]
    Empty,

    #[error("Invalid digit {found:?} at position {position}")]
    InvalidDigit { position: usize, found: char },
}
