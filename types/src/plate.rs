//! Vehicle registration plates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A normalized registration plate such as `B 1234 XYZ`.
///
/// Plates entered by the operator go through [`Plate::from_parts`] or
/// [`Plate::parse`] and are always three alphanumeric segments, uppercased and
/// joined by a single space.
///
/// Plates read back from the history file are only normalized for case and
/// spacing (see [`Plate::from_stored`]). Older files may hold plates such as
/// `B-1 234 X` that the strict rules reject, and one such record must not make
/// the whole history unreadable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Plate(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlateError {
    #[error("plate segment {position} is empty")]
    EmptySegment { position: usize },
    #[error("plate segment {position} must be letters or digits, got {segment:?}")]
    InvalidSegment { position: usize, segment: String },
    #[error("plate needs exactly {} segments, got {found}", Plate::SEGMENTS)]
    SegmentCount { found: usize },
}

impl Plate {
    pub const SEGMENTS: usize = 3;

    /// Normalize the three plate fragments entered by the operator.
    ///
    /// Each fragment is trimmed and uppercased; an empty fragment is rejected.
    pub fn from_parts(region: &str, number: &str, suffix: &str) -> Result<Self, PlateError> {
        let mut normalized = Vec::with_capacity(Self::SEGMENTS);
        for (index, raw) in [region, number, suffix].into_iter().enumerate() {
            let position = index + 1;
            let segment = raw.trim();
            if segment.is_empty() {
                return Err(PlateError::EmptySegment { position });
            }
            if !segment.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(PlateError::InvalidSegment {
                    position,
                    segment: segment.to_string(),
                });
            }
            normalized.push(segment.to_ascii_uppercase());
        }
        Ok(Self(normalized.join(" ")))
    }

    /// Parse a whole plate written on one line, e.g. `"b 1234  xyz"`.
    pub fn parse(text: &str) -> Result<Self, PlateError> {
        let segments: Vec<&str> = text.split_whitespace().collect();
        match segments.as_slice() {
            [region, number, suffix] => Self::from_parts(region, number, suffix),
            _ => Err(PlateError::SegmentCount {
                found: segments.len(),
            }),
        }
    }

    /// Accept a plate as previously stored: trimmed, uppercased, whitespace
    /// collapsed. Never fails.
    #[must_use]
    pub fn from_stored(text: &str) -> Self {
        let words: Vec<String> = text.split_whitespace().map(str::to_uppercase).collect();
        Self(words.join(" "))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Plate {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<String> for Plate {
    fn from(value: String) -> Self {
        Self::from_stored(&value)
    }
}

impl From<Plate> for String {
    fn from(value: Plate) -> Self {
        value.0
    }
}

impl AsRef<str> for Plate {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
