//! Merge engine for SDIF swim-meet entry files.
//!
//! Consolidates every entry file found in a directory (plain `.sd3` files
//! and members of `.zip` archives) into a single SDIF output plus a
//! human-readable report, optionally correcting club country and region
//! codes against a club reference table.

pub mod corrector;
pub mod engine;
pub mod error;
pub mod header;
pub mod report;
pub mod task;

pub use corrector::correct_club_record;
pub use engine::{MergeOptions, MergeOutcome, MergeSummary, run_merge};
pub use error::{MergeError, Result};
pub use header::{DEFAULT_HEADER_TEMPLATE, synthesized_header};
pub use task::MergeHandle;
