//! Field-level correction of club-definition (C1) records.

use tracing::info;

use sdif_model::{ClubDirectory, SdifRecord};

/// Country code written by the country fix.
pub const HOME_COUNTRY: &str = "CAN";

// C1 field windows, 0-indexed and end-exclusive.
const PROVINCE: (usize, usize) = (11, 12);
const CLUB_CODE_PART1: (usize, usize) = (13, 17);
const CLUB_NAME: (usize, usize) = (17, 47);
const COUNTRY: (usize, usize) = (139, 142);
const CLUB_CODE_PART2: (usize, usize) = (149, 150);

/// Applies the enabled corrections to a club-definition record.
///
/// The lookup key is the concatenation of the two trimmed club-code fields.
/// When the directory holds anything other than exactly one entry for that
/// key, the record comes back untouched. Each splice keeps the record
/// length unchanged and touches only its own window; both fixes may apply
/// to the same record.
#[must_use]
pub fn correct_club_record(
    record: &SdifRecord,
    directory: &ClubDirectory,
    fix_country: bool,
    fix_region: bool,
) -> SdifRecord {
    let club_code = format!(
        "{}{}",
        record.field(CLUB_CODE_PART1.0, CLUB_CODE_PART1.1),
        record.field(CLUB_CODE_PART2.0, CLUB_CODE_PART2.1),
    );
    let Some(entry) = directory.resolve(&club_code) else {
        return record.clone();
    };
    let club_name = record.field(CLUB_NAME.0, CLUB_NAME.1);

    let mut corrected = record.clone();
    if fix_country && record.field(COUNTRY.0, COUNTRY.1) != HOME_COUNTRY {
        info!(club = %club_code, name = %club_name, "country code updated");
        corrected = corrected.with_field(COUNTRY.0, COUNTRY.1, HOME_COUNTRY);
    }
    if fix_region && record.field(PROVINCE.0, PROVINCE.1) != entry.province {
        info!(
            club = %club_code,
            name = %club_name,
            province = %entry.province,
            "region code updated"
        );
        corrected = corrected.with_field(PROVINCE.0, PROVINCE.1, &entry.province);
    }
    corrected
}
