//! Candidate-file discovery for a merge run.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Suffix identifying a plain SDIF entry file.
pub const PLAIN_SUFFIX: &str = ".sd3";

/// Suffix identifying a zip archive of entry files.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// How a candidate file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Plain,
    Archive,
}

/// One file selected for merging.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub kind: CandidateKind,
}

impl CandidateFile {
    /// File name as it appears in logs and reports.
    #[must_use]
    pub fn name(&self) -> String {
        file_name(&self.path)
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Lists the immediate entries of `dir` whose name ends in `.sd3` or `.zip`.
///
/// Suffix comparison is case-sensitive, matching the historical behavior
/// (`MEET.SD3` is not selected). Candidates come back in `read_dir` order,
/// which is platform-dependent; callers must not rely on a particular
/// processing order.
pub fn list_candidates(dir: &Path) -> Result<Vec<CandidateFile>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut candidates = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name.ends_with(PLAIN_SUFFIX) {
            candidates.push(CandidateFile {
                path,
                kind: CandidateKind::Plain,
            });
        } else if name.ends_with(ARCHIVE_SUFFIX) {
            candidates.push(CandidateFile {
                path,
                kind: CandidateKind::Archive,
            });
        }
    }

    Ok(candidates)
}
