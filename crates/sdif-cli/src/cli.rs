//! CLI argument definitions for the SDIF merge utility.

use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sdif-merge",
    version,
    about = "Merge SDIF swim-meet entry files into one consolidated file",
    long_about = "Merge every .sd3 entry file in a directory (plain or inside .zip\n\
                  archives) into a single consolidated SDIF file plus a merge report,\n\
                  optionally correcting club country and region codes against a club\n\
                  reference table."
)]
pub struct Cli {
    /// Directory containing .sd3 entry files and .zip archives.
    #[arg(value_name = "ENTRY_DIR")]
    pub entry_dir: PathBuf,

    /// Consolidated SDIF output file.
    #[arg(long = "output", value_name = "FILE", default_value = "output.sd3")]
    pub output: PathBuf,

    /// Merge report file.
    #[arg(long = "report", value_name = "FILE", default_value = "report.txt")]
    pub report: PathBuf,

    /// Rewrite club country codes to CAN.
    #[arg(long = "fix-country")]
    pub fix_country: bool,

    /// Rewrite club region codes from the club reference table.
    #[arg(long = "fix-region")]
    pub fix_region: bool,

    /// Club reference table as a local CSV file.
    #[arg(long = "club-csv", value_name = "FILE", conflicts_with = "club_csv_url")]
    pub club_csv: Option<PathBuf>,

    /// Club reference table fetched from a URL.
    #[arg(long = "club-csv-url", value_name = "URL")]
    pub club_csv_url: Option<String>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,
}
