//! Process-level errors for the `dispenser` binary.
//!
//! Preparation failures are never errors at this level; they are outcomes.
//! What can stop the process is a bad command line, an unreadable or
//! malformed input file, or an invalid configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
