//! Storage backend trait definition.

use crate::error::{StorageError, StorageResult};

/// A read-only byte source holding one cache file.
///
/// Backends are **opaque byte stores**. They never interpret the bytes and
/// never write them; the cache file is produced by the music player and only
/// read here.
///
/// # Invariants
///
/// - `read_at` returns exactly `len` bytes or an error, never a short read
/// - `size` does not change while the backend is alive
/// - Backends must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For cache files on disk
pub trait StorageBackend: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The offset is beyond the current size
    /// - The read would extend beyond the current size
    /// - An I/O error occurs
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Returns the size of the storage in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Reads the whole storage into one buffer.
    ///
    /// The cache is decoded from a single immutable byte range, so callers
    /// load it once up front and hand out slices from there.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::TooLarge`] if the size does not fit in `usize`,
    /// or any error from [`read_at`](Self::read_at).
    fn read_all(&self) -> StorageResult<Vec<u8>> {
        let size = self.size()?;
        let len = usize::try_from(size).map_err(|_| StorageError::TooLarge { size })?;
        self.read_at(0, len)
    }
}
