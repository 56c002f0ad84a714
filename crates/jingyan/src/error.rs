//! Error types for experience library operations.

use std::path::PathBuf;

use thiserror::Error;

/// Error types for loading, validating and converting records.
#[derive(Error, Debug)]
pub enum ExperienceError {
    /// The experience root directory does not exist.
    #[error("experiences directory not found: {0}")]
    RootNotFound(PathBuf),
    /// The given path is neither a record file nor a directory.
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),
    /// File I/O error.
    #[error("IO error on {path}: {source}")]
    Io {
        /// File the operation failed on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A record file could not be parsed.
    #[error("parse error in {path}: {message}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
}

impl ExperienceError {
    /// Wrap an I/O error with the path it occurred on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a parse error for a file.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
