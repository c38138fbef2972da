//! Fuzz testing harnesses.
//!
//! Each target takes arbitrary bytes and must never panic. They can be
//! driven by cargo-fuzz or by the seeded loops in the tests below.

use cmuscache_core::{
    CacheError, CacheFile, CacheImage, CacheLayout, Config, HEADER_SIZE, expected_header,
};
use cmuscache_storage::InMemoryBackend;

/// Fuzz target for whole-file decoding.
///
/// Decodes `data` as a cache for `layout` and renders every record. A
/// failure must end the stream, and nothing may be read outside `data`.
pub fn fuzz_decode(data: &[u8], layout: CacheLayout) {
    let config = Config::new().layout(layout);
    let Ok(cache) = CacheFile::parse(data, &config) else {
        return;
    };

    let mut stream = cache.entries();
    for result in stream.by_ref() {
        match result {
            Ok(entry) => {
                let _ = entry.to_row().to_tsv();
                assert!(entry.offset < data.len() as u64);
            }
            Err(err) => {
                assert!(err.is_corrupt(), "unexpected error kind: {err}");
            }
        }
    }
    assert!(stream.next().is_none(), "stream resumed after ending");
}

/// Fuzz target for record bodies behind a valid header.
///
/// Prepends the header `layout` expects, so the input always reaches the
/// record decoder.
pub fn fuzz_records(data: &[u8], layout: CacheLayout) {
    let mut bytes = expected_header(layout).to_vec();
    bytes.extend_from_slice(data);
    fuzz_decode(&bytes, layout);
}

/// Fuzz target for the load path through a storage backend.
pub fn fuzz_load(data: &[u8]) {
    let backend = InMemoryBackend::with_data(data.to_vec());
    let Ok(image) = CacheImage::load(&backend) else {
        return;
    };
    assert_eq!(image.bytes(), data);

    match image.parse(&Config::default()) {
        Ok(cache) => assert_eq!(cache.is_empty(), data.len() <= HEADER_SIZE),
        Err(err) => assert!(matches!(err, CacheError::CorruptHeader { .. })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{CacheBuilder, EntryBuilder};
    use cmuscache_core::{ByteOrder, WordSize};
    use std::hash::{DefaultHasher, Hash, Hasher};

    const LAYOUTS: [CacheLayout; 4] = [
        CacheLayout::new(WordSize::Four, ByteOrder::Little),
        CacheLayout::new(WordSize::Four, ByteOrder::Big),
        CacheLayout::new(WordSize::Eight, ByteOrder::Little),
        CacheLayout::new(WordSize::Eight, ByteOrder::Big),
    ];

    /// Generate pseudo-random data for fuzzing based on a seed.
    fn generate_random_data(seed: u64, len: usize) -> Vec<u8> {
        let mut hasher = DefaultHasher::new();
        let mut result = Vec::with_capacity(len);
        let mut state = seed;

        for _ in 0..len {
            state.hash(&mut hasher);
            state = hasher.finish();
            hasher = DefaultHasher::new();
            result.push((state & 0xFF) as u8);
        }

        result
    }

    #[test]
    fn fuzz_empty_and_short() {
        for layout in LAYOUTS {
            fuzz_decode(&[], layout);
            fuzz_decode(b"CTC", layout);
            fuzz_records(&[], layout);
        }
        fuzz_load(&[]);
    }

    #[test]
    fn fuzz_random_bodies() {
        for seed in 0..200 {
            let data = generate_random_data(seed, (seed as usize * 7) % 400);
            for layout in LAYOUTS {
                fuzz_records(&data, layout);
                fuzz_decode(&data, layout);
            }
            fuzz_load(&data);
        }
    }

    #[test]
    fn fuzz_random_sizes_in_valid_prefix() {
        // Valid records with the size field overwritten by random values.
        for seed in 0..100u64 {
            let layout = LAYOUTS[(seed % 4) as usize];
            let mut bytes = CacheBuilder::new(layout)
                .entry(EntryBuilder::new("/a").tag("title", "x"))
                .entry(EntryBuilder::new("/b"))
                .build();
            let noise = generate_random_data(seed, 4);
            bytes[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&noise);
            fuzz_decode(&bytes, layout);
        }
    }

    #[test]
    fn fuzz_every_truncation() {
        let layout = CacheLayout::native();
        let bytes = CacheBuilder::new(layout)
            .entry(EntryBuilder::new("/a").tag("artist", "A"))
            .entry(EntryBuilder::new("/b").tag("title", "B"))
            .build();
        for len in 0..=bytes.len() {
            fuzz_decode(&bytes[..len], layout);
        }
    }
}
