//! Error types for the medlabel-core library.

use thiserror::Error;

/// Main error type for the medlabel library.
#[derive(Error, Debug)]
pub enum MedlabelError {
    /// Building the extraction pipeline failed.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Reading or writing the result journal failed.
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while compiling reference data into extractors.
///
/// Extraction over text never fails; only construction does.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A reference list contains an unusable entry.
    #[error("invalid entry in {list}: {reason}")]
    InvalidReference { list: String, reason: String },

    /// A pattern built from reference data did not compile.
    #[error("failed to build pattern for {list}: {source}")]
    Pattern {
        list: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors related to the result journal.
#[derive(Error, Debug)]
pub enum JournalError {
    /// The journal file exists but is not a valid journal.
    #[error("journal {path} is corrupted: {reason}")]
    Corrupted { path: String, reason: String },

    /// The journal could not be moved into place.
    #[error("failed to persist journal {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the medlabel library.
pub type Result<T> = std::result::Result<T, MedlabelError>;
