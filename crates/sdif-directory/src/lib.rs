//! Loading of the club reference table (club code to country/region/name
//! data) from a local CSV file or a remote CSV resource over HTTP.

pub mod error;
pub mod provider;

pub use error::{DirectoryError, Result};
pub use provider::{
    ClubDirectoryProvider, LocalCsvProvider, RemoteCsvProvider, parse_club_csv,
};
