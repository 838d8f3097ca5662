//! Crate-wide error type.
//!
//! Numeric routines never fail; they map degenerate input to sentinel
//! values. Only filesystem, CSV and logger setup, plus the one numeric
//! operation without a meaningful sentinel, report errors.

use std::path::PathBuf;

/// Errors produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input outside an operation's domain with no defined sentinel.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// A filesystem operation on `path` failed.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing or writing a CSV file failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The working directory, used when `PROJECT_BASE_DIR` is unset, could
    /// not be determined.
    #[error("cannot default PROJECT_BASE_DIR to the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// A `.env` file exists but could not be read or parsed.
    #[error("failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// Logger construction failed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used by every fallible function in this crate.
pub type Result<T> = std::result::Result<T, Error>;
