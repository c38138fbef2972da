//! Error types for cache decoding.

use crate::header::HEADER_SIZE;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while reading a cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] cmuscache_storage::StorageError),

    /// The header does not match the signature expected on this platform.
    #[error("corrupt header: expected {expected:02x?}, found {actual:02x?}")]
    CorruptHeader {
        /// The signature this platform expects.
        expected: [u8; HEADER_SIZE],
        /// The bytes found in the file.
        actual: [u8; HEADER_SIZE],
    },

    /// Too few bytes remain for a record prefix.
    #[error("truncated record at offset {offset}: needs {needed} bytes, only {available} available")]
    Truncated {
        /// Absolute file offset of the record.
        offset: u64,
        /// Bytes required for the prefix.
        needed: usize,
        /// Bytes left in the file.
        available: usize,
    },

    /// A record is internally inconsistent.
    #[error("malformed record at offset {offset}: {message}")]
    MalformedRecord {
        /// Absolute file offset of the record.
        offset: u64,
        /// Description of the inconsistency.
        message: String,
    },
}

impl CacheError {
    /// Creates a malformed record error.
    pub fn malformed_record(offset: u64, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            offset,
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the cache contents rather than by
    /// the storage underneath.
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
