//! Error types for input discovery and record sources.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Source directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open an input file.
    #[error("failed to open file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a line from a record source.
    #[error("failed to read from {name}: {source}")]
    SourceRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or decode a zip archive.
    #[error("failed to read archive {path}: {message}")]
    Archive { path: PathBuf, message: String },
}
