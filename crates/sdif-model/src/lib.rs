//! Data model for SDIF merge: fixed-width record values, record-type
//! classification, and the club reference directory.

pub mod directory;
pub mod record;

pub use directory::{ClubDirectory, ClubEntry};
pub use record::{RecordType, SdifRecord};
