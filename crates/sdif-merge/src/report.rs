//! Incremental, human-readable merge report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};

/// Append-only text record of one merge run. Lines are written as
/// processing proceeds, so a crash still leaves the inputs seen so far.
pub struct MergeReport {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl MergeReport {
    /// Creates the report file and writes the header block.
    pub fn create(path: &Path, source_dir: &Path, output_path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| MergeError::ReportUnwritable {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut report = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        };
        report.write_line("SDIF Merge Report")?;
        report.write_line("====================================")?;
        report.write_line("")?;
        report.write_line(&format!("Entry File Directory: {}", source_dir.display()))?;
        report.write_line(&format!("Output SD3 File: {}", output_path.display()))?;
        report.write_line("")?;
        report.write_line("Files Processed:")?;
        report.write_line("")?;
        Ok(report)
    }

    /// Records one fully-consumed input (plain file or archive member).
    pub fn file_processed(&mut self, name: &str) -> Result<()> {
        self.write_line(&format!("Processed file: {name}"))
    }

    /// Writes the final summary count and flushes.
    pub fn summary(&mut self, files_processed: usize) -> Result<()> {
        self.write_line(&format!("Processed {files_processed} files"))?;
        self.flush()
    }

    /// Marks the run as aborted; the output artifact was not completed.
    pub fn aborted(&mut self, reason: &str) -> Result<()> {
        self.write_line("")?;
        self.write_line(&format!("Merge aborted: {reason}"))?;
        self.flush()
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(|e| self.write_error(e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.write_error(e))
    }

    fn write_error(&self, source: std::io::Error) -> MergeError {
        MergeError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
