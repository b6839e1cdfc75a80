use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the archive pipeline and its host glue
///
/// None of these are retried: every stage is a deterministic transform over
/// data that is already in memory, so the first error ends the run.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A stage received structurally wrong input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Page generation was requested without the settings it needs
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
