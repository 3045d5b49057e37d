//! Error types for woa-merge.

use std::path::PathBuf;

use woa_io::IoError;

/// Error type for all fallible operations in the woa-merge crate.
///
/// Every variant aborts the merge; the partially written output is removed.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Returned when no period files are supplied.
    #[error("no input files to merge")]
    NoInputs,

    /// Returned when a period or annual file does not fit the output schema.
    #[error("schema mismatch in {}: {reason}", path.display())]
    SchemaMismatch {
        /// File that failed to match.
        path: PathBuf,
        /// What did not match.
        reason: String,
    },

    /// Returned when the template already defines the record dimension or
    /// its coordinate variable.
    #[error("{} already defines '{name}'", path.display())]
    RecordDimensionExists {
        /// Record dimension name.
        name: String,
        /// Template file.
        path: PathBuf,
    },

    /// Wraps an error from the woa-io crate.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Returned when the finished output cannot be moved into place.
    #[error("cannot finalize {}: {source}", path.display())]
    Filesystem {
        /// Destination path.
        path: PathBuf,
        /// Underlying failure.
        source: std::io::Error,
    },
}
