//! Club reference directory: club code to governing-body club data.

use std::collections::BTreeMap;

use serde::Serialize;

/// One governing-body club from the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubEntry {
    /// Short alphanumeric code, matched case-sensitively.
    pub club_code: String,
    /// Province / region code.
    pub province: String,
    /// Registered club name.
    pub club_name: String,
    /// Preferred display name, when the table provides one.
    pub preferred_club_name: Option<String>,
}

/// Read-only mapping from club code to directory entries, loaded once per
/// merge run.
///
/// Duplicate codes in the source table are kept side by side; a code held
/// by more than one entry is deliberately unresolvable.
#[derive(Debug, Clone, Default)]
pub struct ClubDirectory {
    entries: BTreeMap<String, Vec<ClubEntry>>,
}

impl ClubDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ClubEntry) {
        self.entries
            .entry(entry.club_code.clone())
            .or_default()
            .push(entry);
    }

    /// Resolves a code to its entry only when exactly one entry holds it.
    ///
    /// Zero or several entries yield `None`: never guess.
    #[must_use]
    pub fn resolve(&self, code: &str) -> Option<&ClubEntry> {
        match self.entries.get(code) {
            Some(list) if list.len() == 1 => list.first(),
            _ => None,
        }
    }

    /// Total number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
