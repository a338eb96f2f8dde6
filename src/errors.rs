//! Crate error type
//!
//! The extraction core is total and never fails; errors only arise at the
//! boundary: configuration, note discovery and file I/O.

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::validation::ValidationReport;

/// Errors raised outside the extraction core
#[derive(Debug, Error)]
pub enum DigestError {
    /// The configuration failed validation
    #[error("invalid configuration: {}", summarize(.0))]
    InvalidConfig(ValidationReport),

    /// A JSON config file could not be parsed
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The notes directory does not exist
    #[error("notes directory does not exist: {0}")]
    NotesDirMissing(PathBuf),

    /// No files with the requested extensions were found
    #[error("no note files with extensions [{extensions}] under {dir}")]
    NoNotesFound { dir: PathBuf, extensions: String },
}

impl DigestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn summarize(report: &ValidationReport) -> String {
    report
        .errors()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for boundary operations
pub type Result<T> = std::result::Result<T, DigestError>;
