//! Error types for club reference table loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Club table file not found or not readable.
    #[error("failed to read club table {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("failed to parse club table {context}: {message}")]
    Csv { context: String, message: String },

    /// A required header column is absent.
    #[error("club table {context} is missing required column `{column}`")]
    MissingColumn { context: String, column: String },

    /// The HTTP request itself failed.
    #[error("failed to fetch club table from {url}: {message}")]
    Http { url: String, message: String },

    /// The remote endpoint answered with a non-2xx status.
    #[error("club table request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },
}
