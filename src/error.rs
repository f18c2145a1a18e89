//! Error types for infracheck
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for infracheck operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Main error type for infracheck operations
#[derive(Error, Debug)]
pub enum VerifyError {
    /// A required artifact does not exist
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Reading an artifact failed for a reason other than absence
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A content pattern failed to compile
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// A property id that is not in the catalog
    #[error("unknown property '{id}'")]
    UnknownProperty { id: String },
}

impl VerifyError {
    /// Classify a read failure for `path`, keeping "not found" distinct.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            VerifyError::FileNotFound { path }
        } else {
            VerifyError::Io { path, source }
        }
    }
}
