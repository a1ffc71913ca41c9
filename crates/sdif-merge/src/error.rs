//! Fatal conditions for a merge run.
//!
//! Zero candidate files is not represented here: it is a clean no-op
//! outcome, not an error. Per-record lookup ambiguity is a defined no-op as
//! well and never surfaces as an error.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MergeError>;

#[derive(Debug, Error)]
pub enum MergeError {
    /// The club reference table could not be loaded, or was empty, while a
    /// correction was requested. Raised before any output is written.
    #[error("club directory unavailable ({source_desc}): {reason}")]
    DirectoryUnavailable { source_desc: String, reason: String },

    /// The output file could not be opened for writing.
    #[error("unable to open output file {path}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report file could not be opened for writing.
    #[error("unable to open report file {path}: {source}")]
    ReportUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a record or report line failed mid-run.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No end-of-file (Z0) record was seen in any input. A well-formed
    /// output must be terminated, so the run fails instead of silently
    /// truncating.
    #[error("no end-of-file (Z0) record found in any input")]
    MissingEndMarker,

    /// Input discovery or reading failed.
    #[error(transparent)]
    Ingest(#[from] sdif_ingest::IngestError),

    /// The worker thread running the merge panicked.
    #[error("merge worker thread panicked")]
    WorkerPanicked,
}
