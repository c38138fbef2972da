//! Cache file entry points.

use crate::config::Config;
use crate::error::CacheResult;
use crate::header::{self, HEADER_SIZE};
use crate::row::TrackRow;
use crate::stream::RecordStream;
use cmuscache_storage::StorageBackend;
use tracing::debug;

/// An owned, immutable copy of a cache file.
///
/// The image is loaded once and every decoded entry borrows from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheImage {
    bytes: Vec<u8>,
}

impl CacheImage {
    /// Loads the full contents of `backend`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CacheError::Storage`] if the backend cannot be read.
    pub fn load(backend: &dyn StorageBackend) -> CacheResult<Self> {
        let bytes = backend.read_all()?;
        debug!(len = bytes.len(), "loaded cache image");
        Ok(Self { bytes })
    }

    /// Wraps bytes that are already in memory.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Validates the header and returns a view for decoding.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CacheError::CorruptHeader`] if the header does not
    /// match `config.layout`.
    pub fn parse(&self, config: &Config) -> CacheResult<CacheFile<'_>> {
        CacheFile::parse(&self.bytes, config)
    }
}

/// A cache whose header has been validated.
#[derive(Debug, Clone, Copy)]
pub struct CacheFile<'a> {
    /// Bytes following the header.
    body: &'a [u8],
    config: Config,
}

impl<'a> CacheFile<'a> {
    /// Validates the header of `bytes`.
    ///
    /// Input shorter than a header is accepted and holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CacheError::CorruptHeader`] if the header does not
    /// match `config.layout`.
    pub fn parse(bytes: &'a [u8], config: &Config) -> CacheResult<Self> {
        header::validate(bytes, config.layout)?;
        let body = bytes.get(HEADER_SIZE..).unwrap_or_default();
        Ok(Self {
            body,
            config: *config,
        })
    }

    /// Returns a fresh stream over the records.
    ///
    /// Every call starts again from the first record.
    #[must_use]
    pub fn entries(&self) -> RecordStream<'a> {
        RecordStream::new(self.body, self.config.layout, HEADER_SIZE as u64)
            .with_limit(self.config.limit)
    }

    /// Returns a stream of output rows.
    pub fn rows(&self) -> impl Iterator<Item = CacheResult<TrackRow<'a>>> + 'a {
        self.entries().map(|entry| entry.map(|e| e.to_row()))
    }

    /// Returns true if there are no bytes after the header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the configuration the cache was parsed with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
