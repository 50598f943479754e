//! Error types for backup operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup directory path cannot be empty")]
    EmptyDirectory,

    #[error("failed to create backup directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("io error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("backup with index {0} not found")]
    NotFound(usize),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl BackupError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BackupError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, BackupError>;
