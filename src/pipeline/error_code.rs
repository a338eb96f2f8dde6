//! Stable error codes for configuration diagnostics.

use serde::Serialize;
use std::fmt;

/// Machine-readable category of a configuration diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A limit that must be positive is zero
    NonPositiveLimit,
    /// Two settings contradict each other
    InvalidCombo,
    /// A field the schema does not know
    UnknownField,
    /// A list entry that is empty after trimming
    BlankEntry,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonPositiveLimit => "non_positive_limit",
            Self::InvalidCombo => "invalid_combo",
            Self::UnknownField => "unknown_field",
            Self::BlankEntry => "blank_entry",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
