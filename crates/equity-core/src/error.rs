use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the equity calculator.
///
/// Only conditions that leave nothing to compute are errors. Bad records
/// inside an otherwise readable log are reported as
/// [`RunWarning`](crate::models::RunWarning)s instead.
#[derive(Error, Debug)]
pub enum EquityError {
    /// The grant log does not exist at the configured path.
    #[error("Grant log not found: {0}")]
    InputNotFound(PathBuf),

    /// The grant log exists but could not be read from disk.
    #[error("Failed to read grant log {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The grant log is not a valid JSON document of the expected shape.
    #[error("Failed to parse grant log {path}: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The ownership artifact could not be written.
    #[error("Failed to write ownership data to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON value could not be serialised.
    #[error("Failed to serialise JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the equity crates.
pub type Result<T> = std::result::Result<T, EquityError>;
