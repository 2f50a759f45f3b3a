//! Error types for lexup-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading a static data table.
///
/// Callers that must never block on bad data use the `load_or_empty`
/// constructors, which log these errors and fall back to an empty table.
#[derive(Error, Debug)]
pub enum DataError {
    /// The data file could not be read.
    #[error("failed to read data file {path}: {source}")]
    Read {
        /// Path of the file that failed to read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The data file is not valid JSON of the expected shape.
    #[error("failed to parse {what}: {source}")]
    Parse {
        /// Which table was being parsed (e.g. "synonym table").
        what: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Result type alias using [`DataError`].
pub type DataResult<T> = Result<T, DataError>;

/// Errors from the local progress store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Creating, writing, or removing a namespace file failed.
    #[error("store I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A value could not be serialized for storage.
    #[error("failed to serialize namespace '{namespace}': {source}")]
    Serialize {
        /// The namespace being written.
        namespace: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// No data directory was configured and none could be determined.
    #[error("no data directory available for the progress store")]
    NoDataDir,
}

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;
