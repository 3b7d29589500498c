//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building a cost matrix or loading roster files.
///
/// Advisories that do not stop the pipeline (unmatchable rows, loader
/// warnings) are carried on the returned values instead.
#[derive(Debug, Error)]
pub enum AssignError {
    /// The cost table is empty or not rectangular.
    #[error("invalid cost matrix: {0}")]
    InvalidMatrix(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A roster or output file could not be opened or written.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A roster or output file is not well-formed CSV, or the CSV
    /// reader/writer failed underneath.
    #[error("csv error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
