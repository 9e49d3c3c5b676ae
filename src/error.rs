// Error types for word list and censorship operations.
//
// The library returns typed errors so a hosting service can tell a missing
// list apart from an I/O failure or a tokenizer failure. The binary wraps
// them with anyhow context.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors that can occur while managing or applying the banned word list
#[derive(Debug, Error)]
pub enum FilterError {
    /// The list file does not exist
    #[error("Word list not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Reading, writing or creating a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external tokenizer call failed
    #[error("Tokenization failed: {0}")]
    TokenizeFailure(String),

    /// The word cannot be stored as a single list line
    #[error("Invalid word {0:?}: contains a line terminator")]
    InvalidWord(String),

    /// An operation needed a list but `load` was never called
    #[error("No word list loaded")]
    NotLoaded,
}

impl FilterError {
    /// Classify an I/O error on `path`, splitting out the missing-file case.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            FilterError::NotFound { path }
        } else {
            FilterError::Io { path, source }
        }
    }

    /// Wrap an I/O error on `path` without reclassifying it.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FilterError::Io {
            path: path.into(),
            source,
        }
    }
}
