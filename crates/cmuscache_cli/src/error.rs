//! Error types for the CLI.

use cmuscache_core::CacheError;
use cmuscache_storage::StorageError;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The cache file could not be opened or read.
    #[error("{}: {}", describe_storage(.source), .path.display())]
    Open {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying storage error.
        source: StorageError,
    },

    /// The cache contents are invalid.
    #[error("Corrupt: {}", .path.display())]
    Corrupt {
        /// Path given on the command line.
        path: PathBuf,
        /// What was wrong with the contents.
        source: CacheError,
    },

    /// Writing to standard output failed.
    #[error("write error: {0}")]
    Output(#[from] io::Error),

    /// A row could not be encoded as JSON.
    #[error("encode error: {0}")]
    Encode(serde_json::Error),
}

impl CliError {
    /// Classifies a decode error for `path`.
    pub fn from_cache(path: &Path, err: CacheError) -> Self {
        match err {
            CacheError::Storage(source) => Self::Open {
                path: path.to_path_buf(),
                source,
            },
            source => Self::Corrupt {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Returns true if standard output was closed by the reader.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(err) if err.kind() == io::ErrorKind::BrokenPipe)
    }

    /// Returns the process exit status for this error.
    ///
    /// A corrupt cache is reported but is not a failure of the run.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Corrupt { .. } => ExitCode::SUCCESS,
            _ if self.is_broken_pipe() => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Output(err.into())
        } else {
            Self::Encode(err)
        }
    }
}

/// Describes a storage error as the bare OS message, without the
/// `(os error N)` suffix.
fn describe_storage(err: &StorageError) -> String {
    match err.as_io() {
        Some(io) => describe_io(io),
        None => err.to_string(),
    }
}

fn describe_io(err: &io::Error) -> String {
    let message = err.to_string();
    match message.rfind(" (os error ") {
        Some(at) if message.ends_with(')') => message[..at].to_string(),
        _ => message,
    }
}
