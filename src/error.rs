use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool converts workbooks, parses availability sheets, or writes the merged
/// table.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when reading or writing a CSV record fails.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a configuration file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a CSV record does not carry the five availability columns.
    #[error(
        "malformed record at {}:{line}: expected at least {expected} columns, got {found}",
        .path.display()
    )]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Raised when two files in the CSV directory map to the same source identifier.
    #[error("duplicate source '{source_id}': {} and {}", .first.display(), .second.display())]
    DuplicateSource {
        source_id: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Raised when a directory the pipeline depends on does not exist.
    #[error("directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// Raised when the pipeline configuration fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
