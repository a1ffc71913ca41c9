//! Record sources: ordered line streams over plain files and zip members.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

use tracing::debug;

use sdif_model::SdifRecord;

use crate::discovery::{PLAIN_SUFFIX, file_name};
use crate::error::{IngestError, Result};

/// One physical input: a plain entry file or a single archive member.
///
/// Yields records lazily, in file order, with line terminators stripped.
pub struct RecordSource {
    name: String,
    reader: Box<dyn BufRead + Send>,
}

impl RecordSource {
    /// Report/display name: the file name, or `member@archive`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the next record, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<SdifRecord>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| IngestError::SourceRead {
                name: self.name.clone(),
                source: e,
            })?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(SdifRecord::new(line)))
    }
}

/// Opens a plain entry file as a single record source.
pub fn open_plain(path: &Path) -> Result<RecordSource> {
    let file = File::open(path).map_err(|e| IngestError::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(RecordSource {
        name: file_name(path),
        reader: Box::new(BufReader::new(file)),
    })
}

/// Opens a zip archive and returns one record source per selected member,
/// in archive listing order.
///
/// A member is selected when its name contains `.sd3` anywhere, the
/// historical permissive rule (`notes.sd3x` is selected too). Nested
/// archives are not expanded. Member bytes are decompressed up front and
/// line-iterated from memory.
pub fn open_archive(path: &Path) -> Result<Vec<RecordSource>> {
    let file = File::open(path).map_err(|e| IngestError::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| IngestError::Archive {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let archive_name = file_name(path);

    let mut sources = Vec::new();
    for index in 0..archive.len() {
        let mut member = archive.by_index(index).map_err(|e| IngestError::Archive {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if member.is_dir() || !member.name().contains(PLAIN_SUFFIX) {
            continue;
        }

        let name = format!("{}@{}", member.name(), archive_name);
        debug!(member = %member.name(), archive = %archive_name, "selected archive member");

        let mut bytes = Vec::new();
        member
            .read_to_end(&mut bytes)
            .map_err(|e| IngestError::Archive {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        sources.push(RecordSource {
            name,
            reader: Box::new(Cursor::new(bytes)),
        });
    }

    Ok(sources)
}
