//! # cmuscache core
//!
//! Decoder for the track metadata cache written by the cmus music player.
//!
//! This crate provides:
//! - Header validation against the reading platform's layout
//! - A bounds-checked, lazy record stream over the cache body
//! - Projection of each record's free-form tags onto a fixed field set
//! - Rendering of records as TSV or serde rows
//!
//! The crate only reads the format. Synthetic caches for tests are built by
//! `cmuscache_testkit`.
//!
//! ## Usage
//!
//! ```
//! use cmuscache_core::{CacheFile, Config};
//!
//! // Anything shorter than a header decodes to zero records.
//! let cache = CacheFile::parse(b"CTC", &Config::default()).unwrap();
//! assert_eq!(cache.entries().count(), 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod entry;
mod error;
pub mod header;
mod layout;
mod row;
mod stream;
mod tags;
#[cfg(test)]
mod test_support;

pub use cache::{CacheFile, CacheImage};
pub use config::Config;
pub use entry::{CacheEntry, TagPairs};
pub use error::{CacheError, CacheResult};
pub use header::{expected_header, HeaderFlags, CACHE_MAGIC, CACHE_VERSION, HEADER_SIZE};
pub use layout::{ByteOrder, CacheLayout, WordSize};
pub use row::{format_duration, write_tsv_header, TrackRow, TSV_HEADER};
pub use stream::RecordStream;
pub use tags::{MetadataField, TrackTags};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
