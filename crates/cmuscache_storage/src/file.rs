//! File-based storage backend.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A cache file opened read-only.
///
/// The size is captured when the file is opened; the cache is treated as
/// immutable for the lifetime of the backend.
///
/// # Thread Safety
///
/// Reads seek a shared handle, so the handle sits behind a mutex.
///
/// # Example
///
/// ```no_run
/// use cmuscache_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open(Path::new("cache")).unwrap();
/// let bytes = backend.read_all().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    file: Mutex<File>,
    size: u64,
}

impl FileBackend {
    /// Opens an existing file for reading.
    ///
    /// The file is never created, truncated or written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file cannot be opened or its
    /// metadata cannot be read.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new().read(true).open(path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
            size,
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let size = self.size;
        let end = offset.saturating_add(len as u64);

        if offset > size || end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        if len == 0 {
            return Ok(Vec::new());
        }

        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.size)
    }
}
