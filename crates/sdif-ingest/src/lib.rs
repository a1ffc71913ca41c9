//! Input handling for SDIF merges: discovery of candidate files in a
//! directory and line-oriented record sources over plain files and zip
//! archive members.

pub mod discovery;
pub mod error;
pub mod source;

pub use discovery::{ARCHIVE_SUFFIX, CandidateFile, CandidateKind, PLAIN_SUFFIX, list_candidates};
pub use error::{IngestError, Result};
pub use source::{RecordSource, open_archive, open_plain};
