//! The merge engine: one sequential pass over every input, one
//! consolidated output.
//!
//! Records are emitted in the exact order they are read (enumeration order
//! of inputs, record order within each input), except end-of-file markers,
//! which are deferred and emitted exactly once at the very end.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;
use tracing::{info, warn};

use sdif_directory::ClubDirectoryProvider;
use sdif_ingest::{
    CandidateFile, CandidateKind, RecordSource, list_candidates, open_archive, open_plain,
};
use sdif_model::{ClubDirectory, RecordType, SdifRecord};

use crate::corrector::correct_club_record;
use crate::error::{MergeError, Result};
use crate::header::{DEFAULT_HEADER_TEMPLATE, synthesized_header};
use crate::report::MergeReport;

/// Configuration for one merge invocation.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Directory scanned for `.sd3` files and `.zip` archives.
    pub source_dir: PathBuf,
    /// Consolidated SDIF output file.
    pub output_path: PathBuf,
    /// Human-readable report file.
    pub report_path: PathBuf,
    /// Rewrite club country codes to the home country.
    pub fix_country: bool,
    /// Rewrite club province codes from the reference table.
    pub fix_region: bool,
    /// Template for the synthesized A0 header.
    pub header_template: String,
}

impl MergeOptions {
    #[must_use]
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        report_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_path: output_path.into(),
            report_path: report_path.into(),
            fix_country: false,
            fix_region: false,
            header_template: DEFAULT_HEADER_TEMPLATE.to_string(),
        }
    }

    fn wants_correction(&self) -> bool {
        self.fix_country || self.fix_region
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MergeOutcome {
    /// No candidate files were found: nothing was written. Not an error.
    NoInputFiles,
    /// The merge completed and both artifacts exist.
    Completed(MergeSummary),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// Plain files plus selected archive members, fully consumed.
    pub files_processed: usize,
    pub output_path: PathBuf,
    pub report_path: PathBuf,
}

/// Mutable state for one run. Constructed at merge start, discarded after;
/// never shared across runs.
struct MergeSession {
    first_file: bool,
    last_end_record: Option<SdifRecord>,
    files_processed: usize,
}

/// Runs one merge to completion on the calling thread.
///
/// `provider` is consulted only when a correction flag is set; a load
/// failure or an empty table aborts the run before any output is written.
/// When a fatal condition is hit after output has started, the incomplete
/// output file is removed and the report is marked aborted.
pub fn run_merge(
    options: &MergeOptions,
    provider: Option<&dyn ClubDirectoryProvider>,
) -> Result<MergeOutcome> {
    let candidates = list_candidates(&options.source_dir)?;
    if candidates.is_empty() {
        info!(dir = %options.source_dir.display(), "no SD3 or zip files to process");
        return Ok(MergeOutcome::NoInputFiles);
    }

    let directory = if options.wants_correction() {
        Some(load_directory(provider)?)
    } else {
        None
    };

    // The report opens first so a failed open leaves no artifact at all,
    // and an unwritable output leaves only an aborted report behind.
    let mut report = MergeReport::create(
        &options.report_path,
        &options.source_dir,
        &options.output_path,
    )?;
    let output_file = match File::create(&options.output_path) {
        Ok(file) => file,
        Err(e) => {
            let error = MergeError::OutputUnwritable {
                path: options.output_path.clone(),
                source: e,
            };
            let _ = report.aborted(&error.to_string());
            return Err(error);
        }
    };
    let mut output = BufWriter::new(output_file);

    let header = synthesized_header(&options.header_template, Local::now().date_naive());
    let mut session = MergeSession {
        first_file: true,
        last_end_record: None,
        files_processed: 0,
    };

    let merged = merge_all(
        options,
        &candidates,
        directory.as_ref(),
        &header,
        &mut session,
        &mut output,
        &mut report,
    )
    .and_then(|()| {
        output.flush().map_err(|e| MergeError::Write {
            path: options.output_path.clone(),
            source: e,
        })
    });

    match merged {
        Ok(()) => {
            report.summary(session.files_processed)?;
            info!(files = session.files_processed, "merge complete");
            Ok(MergeOutcome::Completed(MergeSummary {
                files_processed: session.files_processed,
                output_path: options.output_path.clone(),
                report_path: options.report_path.clone(),
            }))
        }
        Err(error) => {
            // Do not leave a malformed output artifact behind.
            drop(output);
            if let Err(remove_error) = std::fs::remove_file(&options.output_path) {
                warn!(
                    path = %options.output_path.display(),
                    error = %remove_error,
                    "failed to remove incomplete output"
                );
            }
            let _ = report.aborted(&error.to_string());
            Err(error)
        }
    }
}

fn load_directory(provider: Option<&dyn ClubDirectoryProvider>) -> Result<ClubDirectory> {
    let Some(provider) = provider else {
        return Err(MergeError::DirectoryUnavailable {
            source_desc: "none".to_string(),
            reason: "a correction was requested but no club table source was configured"
                .to_string(),
        });
    };
    let source_desc = provider.describe();
    let directory = provider
        .load()
        .map_err(|e| MergeError::DirectoryUnavailable {
            source_desc: source_desc.clone(),
            reason: e.to_string(),
        })?;
    if directory.is_empty() {
        return Err(MergeError::DirectoryUnavailable {
            source_desc,
            reason: "club table is empty".to_string(),
        });
    }
    info!(source = %source_desc, entries = directory.len(), "club directory loaded");
    Ok(directory)
}

fn merge_all(
    options: &MergeOptions,
    candidates: &[CandidateFile],
    directory: Option<&ClubDirectory>,
    header: &SdifRecord,
    session: &mut MergeSession,
    output: &mut impl Write,
    report: &mut MergeReport,
) -> Result<()> {
    for candidate in candidates {
        match candidate.kind {
            CandidateKind::Plain => {
                let mut source = open_plain(&candidate.path)?;
                let name = source.name().to_string();
                merge_source(options, &mut source, directory, header, session, output)?;
                report.file_processed(&name)?;
            }
            CandidateKind::Archive => {
                for mut source in open_archive(&candidate.path)? {
                    let name = source.name().to_string();
                    merge_source(options, &mut source, directory, header, session, output)?;
                    report.file_processed(&name)?;
                }
            }
        }
    }

    // The deferred end-of-file marker terminates the output: the last one
    // seen across all inputs, exactly once.
    match session.last_end_record.take() {
        Some(record) => write_record(options, output, &record),
        None => Err(MergeError::MissingEndMarker),
    }
}

fn merge_source(
    options: &MergeOptions,
    source: &mut RecordSource,
    directory: Option<&ClubDirectory>,
    header: &SdifRecord,
    session: &mut MergeSession,
    output: &mut impl Write,
) -> Result<()> {
    let name = source.name().to_string();
    while let Some(record) = source.next_record()? {
        match record.record_type() {
            RecordType::FileHeader => {
                if session.first_file {
                    write_record(options, output, header)?;
                }
            }
            RecordType::MeetData => {
                if session.first_file {
                    write_record(options, output, &record)?;
                }
            }
            RecordType::ClubDefinition => {
                let emitted = match directory {
                    Some(directory) => correct_club_record(
                        &record,
                        directory,
                        options.fix_country,
                        options.fix_region,
                    ),
                    None => record,
                };
                write_record(options, output, &emitted)?;
            }
            RecordType::EndOfFile => {
                session.last_end_record = Some(record);
            }
            RecordType::Other => write_record(options, output, &record)?,
        }
    }

    // Each plain file and each selected archive member counts as one input;
    // first-file treatment ends once the first one is fully consumed.
    session.first_file = false;
    session.files_processed += 1;
    info!(input = %name, "processed file");
    Ok(())
}

fn write_record(
    options: &MergeOptions,
    output: &mut impl Write,
    record: &SdifRecord,
) -> Result<()> {
    writeln!(output, "{record}").map_err(|e| MergeError::Write {
        path: options.output_path.clone(),
        source: e,
    })
}
