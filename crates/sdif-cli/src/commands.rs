//! The merge command: build options and provider, run the merge on a
//! worker thread, surface the outcome.

use anyhow::{Result, bail};
use tracing::info;

use sdif_directory::{ClubDirectoryProvider, LocalCsvProvider, RemoteCsvProvider};
use sdif_merge::{MergeHandle, MergeOptions, MergeOutcome};

use crate::cli::Cli;

pub fn run_merge_command(cli: &Cli) -> Result<MergeOutcome> {
    let mut options = MergeOptions::new(
        cli.entry_dir.clone(),
        cli.output.clone(),
        cli.report.clone(),
    );
    options.fix_country = cli.fix_country;
    options.fix_region = cli.fix_region;

    let provider = build_provider(cli);
    if (cli.fix_country || cli.fix_region) && provider.is_none() {
        bail!("--fix-country and --fix-region require --club-csv or --club-csv-url");
    }

    info!(dir = %cli.entry_dir.display(), "merging SDIF files");
    let handle = MergeHandle::spawn(options, provider);
    let outcome = handle.join()?;
    match &outcome {
        MergeOutcome::NoInputFiles => {
            info!("no SD3 or zip files to process");
        }
        MergeOutcome::Completed(summary) => {
            info!(
                files = summary.files_processed,
                output = %summary.output_path.display(),
                report = %summary.report_path.display(),
                "merge finished"
            );
        }
    }
    Ok(outcome)
}

fn build_provider(cli: &Cli) -> Option<Box<dyn ClubDirectoryProvider + Send>> {
    if let Some(path) = &cli.club_csv {
        return Some(Box::new(LocalCsvProvider::new(path.clone())));
    }
    if let Some(url) = &cli.club_csv_url {
        return Some(Box::new(RemoteCsvProvider::new(url.clone())));
    }
    None
}
