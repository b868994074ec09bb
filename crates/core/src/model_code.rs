//! Parsed model identifiers

use serde::{Deserialize, Serialize};

/// Series sentinel for codes whose series cannot be determined
pub const GENERIC_SERIES: &str = "GEN";

/// Uppercase a model string and drop everything except ASCII letters and digits.
///
/// Used for catalog keys and for model-family matching that must ignore
/// separators ("T137.407" and "T137407" compare equal).
pub fn compact_key(model: &str) -> String {
    model
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// A model token extracted from free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCode {
    /// Input exactly as received
    pub raw: String,
    /// Chosen uppercase token; `-` and `.` separators preserved
    pub normalized: String,
    /// `normalized` without separators
    pub compact: String,
    /// Series prefix, or [`GENERIC_SERIES`]
    pub series: String,
}

impl ModelCode {
    pub fn new(
        raw: impl Into<String>,
        normalized: impl Into<String>,
        series: impl Into<String>,
    ) -> Self {
        let normalized = normalized.into();
        Self {
            raw: raw.into(),
            compact: compact_key(&normalized),
            normalized,
            series: series.into(),
        }
    }

    /// True when no series rule matched
    pub fn is_generic(&self) -> bool {
        self.series == GENERIC_SERIES
    }
}
