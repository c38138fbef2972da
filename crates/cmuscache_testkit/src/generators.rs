//! Property-based test generators using proptest.
//!
//! Strategies produce well-formed records: filenames and tag strings never
//! contain NUL, since the format has no way to escape one.

use crate::builder::{CacheBuilder, EntryBuilder};
use cmuscache_core::{ByteOrder, CacheLayout, MetadataField, WordSize};
use proptest::prelude::*;

/// Strategy for every supported layout.
pub fn layout_strategy() -> impl Strategy<Value = CacheLayout> {
    (
        prop_oneof![Just(WordSize::Four), Just(WordSize::Eight)],
        prop_oneof![Just(ByteOrder::Little), Just(ByteOrder::Big)],
    )
        .prop_map(|(word_size, byte_order)| CacheLayout::new(word_size, byte_order))
}

/// Strategy for NUL-free byte strings up to `max` bytes.
pub fn cstring_strategy(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=255, 0..=max)
}

/// Strategy for absolute file paths.
pub fn filename_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("(/[a-zA-Z0-9 _.-]{1,12}){1,4}\\.(mp3|flac|ogg|opus)")
        .expect("Invalid regex")
}

/// Strategy for tag keys, biased towards the known ones.
pub fn tag_key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        3 => prop::sample::select(MetadataField::ALL.to_vec())
            .prop_map(|field| field.key().as_bytes().to_vec()),
        1 => prop::string::string_regex("[a-z_]{1,16}")
            .expect("Invalid regex")
            .prop_map(String::into_bytes),
        1 => cstring_strategy(8),
    ]
}

/// Strategy for a list of tag pairs, repeats allowed.
pub fn tag_pairs_strategy(max: usize) -> impl Strategy<Value = Vec<(Vec<u8>, Vec<u8>)>> {
    prop::collection::vec((tag_key_strategy(), cstring_strategy(24)), 0..=max)
}

/// Strategy for one well-formed record.
pub fn entry_strategy() -> impl Strategy<Value = EntryBuilder> {
    (
        filename_strategy(),
        cstring_strategy(6),
        cstring_strategy(6),
        tag_pairs_strategy(8),
        any::<(i32, i64, i32, i32, i32)>(),
    )
        .prop_map(|(filename, first, second, tags, numbers)| {
            let (play_count, mtime, duration, bitrate, bpm) = numbers;
            EntryBuilder::new(filename)
                .internal(first, second)
                .tags(tags)
                .play_count(play_count)
                .mtime(mtime)
                .duration(duration)
                .bitrate(bitrate)
                .bpm(bpm)
        })
}

/// Strategy for a well-formed cache image with up to `max_entries` records.
pub fn cache_strategy(max_entries: usize) -> impl Strategy<Value = CacheBuilder> {
    (
        layout_strategy(),
        prop::collection::vec(entry_strategy(), 0..=max_entries),
    )
        .prop_map(|(layout, entries)| CacheBuilder::new(layout).entries(entries))
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
