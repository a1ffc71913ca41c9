//! Synthesized A0 header for the merged output.

use chrono::NaiveDate;

use sdif_model::SdifRecord;

/// Offset of the creation-date window in the header template.
pub const DATE_OFFSET: usize = 80;

/// Width of the creation-date window.
pub const DATE_WIDTH: usize = 8;

/// Default vendor template for the synthesized header. The date window at
/// offset 80 is overwritten on every run; the rest is constant.
pub const DEFAULT_HEADER_TEMPLATE: &str = "A01V3      01                              SDIF MERGE UTILITY            SDIF MERGE          unknown     07012024                                               ";

/// Builds the header record emitted in place of the first input's A0,
/// writing `date` as `MMDDYYYY` into the fixed date window.
#[must_use]
pub fn synthesized_header(template: &str, date: NaiveDate) -> SdifRecord {
    let stamp = date.format("%m%d%Y").to_string();
    SdifRecord::new(template).with_field(DATE_OFFSET, DATE_OFFSET + DATE_WIDTH, &stamp)
}
