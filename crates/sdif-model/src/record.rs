//! Fixed-width SDIF record values and type classification.

use std::fmt;

/// Record type, taken from the first two characters of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// `A0` — file header identifying the generating program.
    FileHeader,
    /// `B1` — meet data.
    MeetData,
    /// `C1` — club definition, carrying country and region codes.
    ClubDefinition,
    /// `Z0` — end-of-file marker.
    EndOfFile,
    /// Any other tag; passed through a merge untouched.
    Other,
}

impl RecordType {
    /// Classifies a raw line by its two-character type tag.
    ///
    /// Lines shorter than two characters classify as [`RecordType::Other`].
    #[must_use]
    pub fn classify(line: &str) -> Self {
        match line.get(..2) {
            Some("A0") => Self::FileHeader,
            Some("B1") => Self::MeetData,
            Some("C1") => Self::ClubDefinition,
            Some("Z0") => Self::EndOfFile,
            _ => Self::Other,
        }
    }
}

/// One fixed-width SDIF line, without its line terminator.
///
/// Records are immutable values: a rewrite always produces a new record.
/// Field access is positional and tolerates lines shorter than the field
/// window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdifRecord {
    raw: String,
}

impl SdifRecord {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    #[must_use]
    pub fn record_type(&self) -> RecordType {
        RecordType::classify(&self.raw)
    }

    /// Raw line content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Record length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The trimmed `[start, end)` field, or an empty string when the record
    /// is shorter than `end`.
    #[must_use]
    pub fn field(&self, start: usize, end: usize) -> &str {
        self.raw.get(start..end).map(str::trim).unwrap_or("")
    }

    /// Returns a new record with `value` written into the `[start, end)`
    /// window, space-padded or truncated to the window width so the total
    /// record length in bytes is unchanged. Truncation lands on a char
    /// boundary, so a multi-byte value may occupy fewer bytes than the
    /// window and is padded out with spaces.
    ///
    /// Returns the record unchanged when it is shorter than `end`.
    #[must_use]
    pub fn with_field(&self, start: usize, end: usize, value: &str) -> Self {
        if start >= end {
            return self.clone();
        }
        let (Some(head), Some(tail)) = (self.raw.get(..start), self.raw.get(end..)) else {
            return self.clone();
        };
        let width = end - start;
        let mut take = value.len().min(width);
        while !value.is_char_boundary(take) {
            take -= 1;
        }
        let mut window = String::with_capacity(width);
        window.push_str(&value[..take]);
        while window.len() < width {
            window.push(' ');
        }
        let mut raw = String::with_capacity(self.raw.len());
        raw.push_str(head);
        raw.push_str(&window);
        raw.push_str(tail);
        Self { raw }
    }
}

impl fmt::Display for SdifRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
