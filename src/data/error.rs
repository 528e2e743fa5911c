use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading or annotating a table.
///
/// Missing cell values are *not* errors: they load as [`Cell::Null`],
/// propagate as null through splits, and test false in predicates.
///
/// [`Cell::Null`]: super::model::Cell::Null
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file could not be opened.
    #[error("source not found: {path}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row could not be parsed, usually because its field count
    /// disagrees with the header.
    #[error("malformed source at row {row}: {detail}")]
    MalformedSource { row: usize, detail: String },

    /// A pattern failed to compile as a regular expression.
    #[error("invalid pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An operation referenced a column the table does not have.
    #[error("unknown column {name:?}")]
    UnknownColumn { name: String },
}

pub type Result<T> = std::result::Result<T, DataError>;
