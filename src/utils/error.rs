// src/utils/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in the archiver library.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// An error occurred on the underlying source or sink (e.g., file not found, disk full).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source handed to the encoder has no bytes.
    #[error("cannot archive an empty input")]
    EmptyInput,

    /// The archive header declares a tree that does not match the bytes present.
    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    /// The payload bits cannot be fully resolved into bytes.
    #[error("corrupt payload: {0}")]
    CorruptPayload(String),

    /// The encoder was asked for a byte its code table has never seen.
    #[error("byte {0:#04x} has no code in the table")]
    UnknownSymbol(u8),

    /// A codec setting is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The output path names the input file itself.
    #[error("refusing to overwrite the input file {}", .0.display())]
    SameFile(PathBuf),
}

impl ArchiveError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ArchiveError::MalformedArchive(msg.into())
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        ArchiveError::CorruptPayload(msg.into())
    }

    /// Whether the error describes bad archive contents rather than a failing device.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ArchiveError::MalformedArchive(_) | ArchiveError::CorruptPayload(_)
        )
    }
}

/// A specialized `Result` type for archiver operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
