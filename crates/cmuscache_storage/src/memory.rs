//! In-memory storage backend.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};

/// An in-memory byte source.
///
/// Holds a cache image built in memory, typically by the testkit's
/// synthetic encoder. Contents are fixed at construction.
///
/// # Example
///
/// ```rust
/// use cmuscache_storage::{StorageBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::with_data(b"CTC".to_vec());
/// assert_eq!(backend.size().unwrap(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    data: Vec<u8>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory backend over pre-existing bytes.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Returns the backing bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl StorageBackend for InMemoryBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let size = self.data.len() as u64;
        let err = || StorageError::ReadPastEnd { offset, len, size };

        let start = usize::try_from(offset).map_err(|_| err())?;
        let end = start.checked_add(len).ok_or_else(err)?;

        self.data.get(start..end).map(<[u8]>::to_vec).ok_or_else(err)
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.size().unwrap(), 0);
        assert!(backend.data().is_empty());
        assert!(backend.read_all().unwrap().is_empty());
    }

    #[test]
    fn memory_read_at_returns_correct_data() {
        let backend = InMemoryBackend::with_data(b"hello world".to_vec());

        assert_eq!(backend.read_at(0, 5).unwrap(), b"hello");
        assert_eq!(backend.read_at(6, 5).unwrap(), b"world");
    }

    #[test]
    fn memory_read_at_past_end_fails() {
        let backend = InMemoryBackend::with_data(b"hello".to_vec());

        let result = backend.read_at(10, 5);
        assert!(matches!(result, Err(StorageError::ReadPastEnd { .. })));
    }

    #[test]
    fn memory_read_at_extending_past_end_fails() {
        let backend = InMemoryBackend::with_data(b"hello".to_vec());

        let result = backend.read_at(3, 10);
        assert!(matches!(result, Err(StorageError::ReadPastEnd { .. })));
    }

    #[test]
    fn memory_read_at_overflowing_len_fails() {
        let backend = InMemoryBackend::with_data(b"hello".to_vec());

        let result = backend.read_at(1, usize::MAX);
        assert!(matches!(result, Err(StorageError::ReadPastEnd { .. })));
    }

    #[test]
    fn memory_empty_read() {
        let backend = InMemoryBackend::with_data(b"hello".to_vec());

        let data = backend.read_at(2, 0).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn memory_read_all() {
        let backend = InMemoryBackend::with_data(b"preloaded".to_vec());
        assert_eq!(backend.size().unwrap(), 9);
        assert_eq!(backend.read_all().unwrap(), b"preloaded");
    }

    proptest! {
        #[test]
        fn read_at_matches_slice(
            data in prop::collection::vec(any::<u8>(), 0..256),
            offset in 0u64..300,
            len in 0usize..300,
        ) {
            let backend = InMemoryBackend::with_data(data.clone());
            let expected = usize::try_from(offset)
                .ok()
                .and_then(|start| data.get(start..start + len));

            match backend.read_at(offset, len) {
                Ok(bytes) => prop_assert_eq!(Some(bytes.as_slice()), expected),
                Err(_) => prop_assert!(expected.is_none()),
            }
        }
    }
}
