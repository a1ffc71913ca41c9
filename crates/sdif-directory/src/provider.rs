//! Club directory providers: one trait, a local-file and a remote-HTTP
//! implementation, both yielding the same table shape.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use sdif_model::{ClubDirectory, ClubEntry};

use crate::error::{DirectoryError, Result};

/// Required header column holding the club code.
pub const COLUMN_CLUB_CODE: &str = "Club Code";
/// Required header column holding the province / region code.
pub const COLUMN_PROVINCE: &str = "Province";
/// Required header column holding the registered club name.
pub const COLUMN_CLUB_NAME: &str = "Club Name";
/// Required header column holding the preferred name (value may be empty).
pub const COLUMN_PREFERRED_NAME: &str = "Preferred Club Name";

/// HTTP request timeout for the remote table.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A source of the club reference table.
///
/// The table is loaded once per merge run and treated as read-only for the
/// run's lifetime.
pub trait ClubDirectoryProvider {
    /// Loads the whole table.
    fn load(&self) -> Result<ClubDirectory>;

    /// Human-readable location for logs and error context.
    fn describe(&self) -> String;
}

/// Loads the club table from a CSV file on disk.
pub struct LocalCsvProvider {
    path: PathBuf,
}

impl LocalCsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClubDirectoryProvider for LocalCsvProvider {
    fn load(&self) -> Result<ClubDirectory> {
        let bytes = std::fs::read(&self.path).map_err(|e| DirectoryError::FileRead {
            path: self.path.clone(),
            source: e,
        })?;
        parse_club_csv(&bytes, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the club table from a remote CSV resource over HTTP.
pub struct RemoteCsvProvider {
    url: String,
}

impl RemoteCsvProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ClubDirectoryProvider for RemoteCsvProvider {
    fn load(&self) -> Result<ClubDirectory> {
        let http_error = |message: String| DirectoryError::Http {
            url: self.url.clone(),
            message,
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| http_error(e.to_string()))?;
        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| http_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().map_err(|e| http_error(e.to_string()))?;
        parse_club_csv(&body, &self.describe())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim_matches('\u{feff}') == name)
}

/// Parses the club table CSV.
///
/// All four required columns must be present in the header row. Rows with
/// an empty club code are skipped. Duplicate codes are kept side by side so
/// that lookup can refuse to guess.
pub fn parse_club_csv(bytes: &[u8], context: &str) -> Result<ClubDirectory> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| DirectoryError::Csv {
            context: context.to_string(),
            message: e.to_string(),
        })?
        .clone();

    let require = |column: &str| {
        header_index(&headers, column).ok_or_else(|| DirectoryError::MissingColumn {
            context: context.to_string(),
            column: column.to_string(),
        })
    };
    let idx_code = require(COLUMN_CLUB_CODE)?;
    let idx_province = require(COLUMN_PROVINCE)?;
    let idx_name = require(COLUMN_CLUB_NAME)?;
    let idx_preferred = require(COLUMN_PREFERRED_NAME)?;

    let mut directory = ClubDirectory::new();
    for row_result in reader.records() {
        let row = row_result.map_err(|e| DirectoryError::Csv {
            context: context.to_string(),
            message: e.to_string(),
        })?;
        let get = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");

        let club_code = get(idx_code);
        if club_code.is_empty() {
            continue;
        }
        let preferred = get(idx_preferred);

        directory.insert(ClubEntry {
            club_code: club_code.to_string(),
            province: get(idx_province).to_string(),
            club_name: get(idx_name).to_string(),
            preferred_club_name: (!preferred.is_empty()).then(|| preferred.to_string()),
        });
    }

    debug!(source = %context, entries = directory.len(), "loaded club directory");
    Ok(directory)
}
