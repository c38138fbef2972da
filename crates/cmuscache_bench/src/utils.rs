//! Benchmark utilities.

use cmuscache_core::{CacheLayout, MetadataField};
use cmuscache_testkit::{CacheBuilder, EntryBuilder};
use rand::seq::SliceRandom;
use rand::Rng;

const WORDS: &[&str] = &[
    "night", "river", "echo", "glass", "signal", "paper", "summer", "static", "velvet", "orbit",
];

/// Generate a random title-like phrase of up to `max_words` words.
pub fn random_phrase(rng: &mut impl Rng, max_words: usize) -> String {
    let count = rng.gen_range(1..=max_words.max(1));
    (0..count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate one record with every known tag and `extra_tags` unknown ones.
pub fn random_entry(rng: &mut impl Rng, index: usize, extra_tags: usize) -> EntryBuilder {
    let mut entry = EntryBuilder::new(format!(
        "/music/{}/{index:05}.flac",
        random_phrase(rng, 2)
    ))
    .play_count(rng.gen_range(0..500))
    .mtime(rng.gen_range(1_000_000_000..1_800_000_000))
    .duration(rng.gen_range(30..900))
    .bitrate(rng.gen_range(96_000..1_411_000));

    for field in MetadataField::ALL {
        let value = match field {
            MetadataField::Track => rng.gen_range(1..30).to_string(),
            _ => random_phrase(rng, 4),
        };
        entry = entry.tag(field.key(), value);
    }
    for i in 0..extra_tags {
        entry = entry.tag(format!("x_custom_{i}"), random_phrase(rng, 3));
    }
    entry
}

/// Generate a cache image of `count` random records for `layout`.
pub fn generate_cache(layout: CacheLayout, count: usize, extra_tags: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    CacheBuilder::new(layout)
        .entries((0..count).map(|i| random_entry(&mut rng, i, extra_tags)))
        .build()
}
