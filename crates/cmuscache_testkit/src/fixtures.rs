//! Test fixtures.
//!
//! Writes cache images to temporary files so the file backend and the
//! binary can be exercised against real paths.

use crate::builder::{CacheBuilder, EntryBuilder};
use cmuscache_core::{CacheLayout, HEADER_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A cache file in a temporary directory, removed on drop.
pub struct TempCache {
    path: PathBuf,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: TempDir,
}

impl TempCache {
    /// Writes `bytes` to a fresh `cache` file.
    pub fn with_bytes(bytes: &[u8]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("cache");
        fs::write(&path, bytes).expect("Failed to write cache file");
        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Writes the image built by `builder`.
    pub fn from_builder(builder: &CacheBuilder) -> Self {
        Self::with_bytes(&builder.build())
    }

    /// Returns the path of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a path in the same directory that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.path.with_file_name("no-such-cache")
    }
}

/// Runs `f` with the path of a temporary file holding `bytes`.
pub fn with_cache_file<F, R>(bytes: &[u8], f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let cache = TempCache::with_bytes(bytes);
    f(cache.path())
}

/// Common cache scenarios.
pub mod scenarios {
    use super::*;

    /// The single-record library used throughout the docs: one track with a
    /// title, an artist and a track number.
    pub fn single_track(layout: CacheLayout) -> CacheBuilder {
        CacheBuilder::new(layout).entry(
            EntryBuilder::new("/music/a.mp3")
                .tag("title", "Song")
                .tag("artist", "Band")
                .tag("tracknumber", "3")
                .play_count(5)
                .duration(245),
        )
    }

    /// The expected TSV row for [`single_track`].
    pub const SINGLE_TRACK_ROW: &str = "/music/a.mp3\tSong\tBand\t\t\tBand\t3\t04:05\t245\t5\t\n";

    /// A library of `count` records with distinct filenames and play counts.
    pub fn library(layout: CacheLayout, count: usize) -> CacheBuilder {
        CacheBuilder::new(layout).entries((0..count).map(|i| {
            EntryBuilder::new(format!("/music/{i:04}.flac"))
                .tag("title", format!("Track {i}"))
                .tag("artist", "Band")
                .tag("album", "Album")
                .tag("tracknumber", (i % 20 + 1).to_string())
                .play_count(i32::try_from(i).unwrap_or(i32::MAX))
                .duration(180)
        }))
    }

    /// A cache whose header differs from `layout`'s in the first magic byte.
    pub fn bad_magic(layout: CacheLayout) -> CacheBuilder {
        let mut header = cmuscache_core::expected_header(layout);
        header[0] = b'X';
        single_track(layout).header(header)
    }

    /// A truncated file: fewer bytes than a header.
    pub fn short_file(layout: CacheLayout) -> Vec<u8> {
        cmuscache_core::expected_header(layout)[..HEADER_SIZE - 3].to_vec()
    }
}
