//! Decoding scenarios across the whole pipeline.

use cmuscache_core::{
    ByteOrder, CacheError, CacheFile, CacheImage, CacheLayout, Config, MetadataField, WordSize,
    TSV_HEADER,
};
use cmuscache_storage::FileBackend;
use cmuscache_testkit::prelude::*;
use proptest::prelude::*;

const LAYOUTS: [CacheLayout; 4] = [
    CacheLayout::new(WordSize::Four, ByteOrder::Little),
    CacheLayout::new(WordSize::Four, ByteOrder::Big),
    CacheLayout::new(WordSize::Eight, ByteOrder::Little),
    CacheLayout::new(WordSize::Eight, ByteOrder::Big),
];

fn render(bytes: &[u8], layout: CacheLayout) -> Result<String, CacheError> {
    let cache = CacheFile::parse(bytes, &Config::new().layout(layout))?;
    let mut out = String::from(TSV_HEADER);
    for row in cache.rows() {
        out.push_str(&row?.to_tsv());
    }
    Ok(out)
}

#[test]
fn single_track_row_on_every_layout() {
    for layout in LAYOUTS {
        let bytes = scenarios::single_track(layout).build();
        let out = render(&bytes, layout).unwrap();
        assert_eq!(out, format!("{TSV_HEADER}{}", scenarios::SINGLE_TRACK_ROW));
    }
}

#[test]
fn short_file_yields_header_row_only() {
    for layout in LAYOUTS {
        let header = cmuscache_core::expected_header(layout);
        for len in 0..header.len() {
            assert_eq!(render(&header[..len], layout).unwrap(), TSV_HEADER);
        }
        let bytes = scenarios::short_file(layout);
        assert_eq!(render(&bytes, layout).unwrap(), TSV_HEADER);
    }
}

#[test]
fn mismatched_header_produces_no_rows() {
    let layout = CacheLayout::native();
    let bytes = scenarios::bad_magic(layout).build();
    let err = render(&bytes, layout).unwrap_err();
    assert!(matches!(err, CacheError::CorruptHeader { .. }));
}

#[test]
fn foreign_layout_is_rejected_not_reinterpreted() {
    for written in LAYOUTS {
        for reader in LAYOUTS.into_iter().filter(|l| *l != written) {
            let bytes = scenarios::single_track(written).build();
            assert!(matches!(
                render(&bytes, reader),
                Err(CacheError::CorruptHeader { .. })
            ));
        }
    }
}

#[test]
fn unknown_keys_are_ignored() {
    let layout = CacheLayout::native();
    let bytes = CacheBuilder::new(layout)
        .entry(
            EntryBuilder::new("/x.mp3")
                .tag("foo", "bar")
                .tag("title", "Song")
                .tag("Title", "Wrong case")
                .tag("genre", "Jazz")
                .tag("album", "LP")
                .tag("comment", "live"),
        )
        .build();
    let cache = CacheFile::parse(&bytes, &Config::default()).unwrap();
    let row = cache.rows().next().unwrap().unwrap();

    assert_eq!(row.title, "Song");
    assert_eq!(row.genre, "Jazz");
    assert_eq!(row.album, "LP");
    assert_eq!(row.comment, "live");
    assert_eq!(row.artist, "");
}

#[test]
fn albumartist_falls_back_to_artist() {
    let layout = CacheLayout::native();
    let bytes = CacheBuilder::new(layout)
        .entry(EntryBuilder::new("/a").tag("artist", "Band"))
        .entry(
            EntryBuilder::new("/b")
                .tag("artist", "Band")
                .tag("albumartist", "Various"),
        )
        .build();
    let cache = CacheFile::parse(&bytes, &Config::default()).unwrap();
    let artists: Vec<_> = cache
        .rows()
        .map(|row| row.unwrap().albumartist.into_owned())
        .collect();

    assert_eq!(artists, vec!["Band", "Various"]);
}

#[test]
fn corrupt_record_keeps_earlier_rows() {
    let layout = CacheLayout::native();
    let builder = CacheBuilder::new(layout)
        .entry(EntryBuilder::new("/good.mp3").tag("title", "Good"))
        .entry(EntryBuilder::new("/bad.mp3").declared_size(4))
        .entry(EntryBuilder::new("/never.mp3"));
    let bytes = builder.build();
    let bad_offset = builder.offsets()[1];
    let cache = CacheFile::parse(&bytes, &Config::default()).unwrap();
    let results: Vec<_> = cache.rows().collect();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().title, "Good");
    assert!(matches!(
        results[1],
        Err(CacheError::MalformedRecord { offset, .. }) if offset == bad_offset
    ));
}

#[test]
fn unterminated_region_is_malformed() {
    let layout = CacheLayout::native();
    let bytes = CacheBuilder::new(layout)
        .entry(EntryBuilder::new("/f").tag("title", "Song").unterminated())
        .build();
    assert!(matches!(
        render(&bytes, layout),
        Err(CacheError::MalformedRecord { .. })
    ));
}

#[test]
fn dangling_key_is_ignored() {
    let layout = CacheLayout::native();
    let bytes = CacheBuilder::new(layout)
        .entry(
            EntryBuilder::new("/f")
                .tag("title", "Song")
                .dangling_key("artist"),
        )
        .build();
    let cache = CacheFile::parse(&bytes, &Config::default()).unwrap();
    let entry = cache.entries().next().unwrap().unwrap();

    assert_eq!(entry.pair_count(), 1);
    assert_eq!(entry.track_tags().get(MetadataField::Artist), b"");
}

#[test]
fn trailing_garbage_is_truncated() {
    let layout = CacheLayout::native();
    let bytes = scenarios::single_track(layout).trailing_bytes(&[0xAB; 20]).build();
    let cache = CacheFile::parse(&bytes, &Config::default()).unwrap();
    let results: Vec<_> = cache.entries().collect();

    assert_eq!(results.len(), 2);
    assert!(matches!(
        results[1],
        Err(CacheError::Truncated { available: 20, .. })
    ));
}

#[test]
fn decoding_from_a_file_on_disk() {
    let builder = scenarios::library(CacheLayout::native(), 50);
    let cache_file = TempCache::from_builder(&builder);

    let backend = FileBackend::open(cache_file.path()).unwrap();
    let image = CacheImage::load(&backend).unwrap();
    let cache = image.parse(&Config::default()).unwrap();
    let rows: Vec<_> = cache.rows().collect::<Result<_, _>>().unwrap();

    assert_eq!(rows.len(), 50);
    assert_eq!(rows[49].filename, "/music/0049.flac");
    assert_eq!(rows[49].track, "10");
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn row_count_matches_record_count(builder in cache_strategy(8)) {
        let bytes = builder.build();
        let cache = CacheFile::parse(&bytes, &Config::new().layout(builder.layout())).unwrap();
        let mut stream = cache.entries();
        let mut offsets = Vec::new();
        for entry in stream.by_ref() {
            offsets.push(entry.unwrap().offset);
        }

        prop_assert_eq!(offsets, builder.offsets());
        prop_assert_eq!(stream.position() + 8, bytes.len());
    }

    #[test]
    fn encoded_fields_decode_unchanged(builder in cache_strategy(4)) {
        let bytes = builder.build();
        let cache = CacheFile::parse(&bytes, &Config::new().layout(builder.layout())).unwrap();

        for (entry, expected) in cache.entries().zip(builder.entry_builders()) {
            let entry = entry.unwrap();
            let (play_count, mtime, duration, bitrate, bpm) = expected.numbers();
            prop_assert_eq!(entry.play_count, play_count);
            prop_assert_eq!(entry.mtime, mtime);
            prop_assert_eq!(entry.duration, duration);
            prop_assert_eq!(entry.bitrate, bitrate);
            prop_assert_eq!(entry.bpm, bpm);
            prop_assert_eq!(entry.filename(), expected.filename());
            prop_assert!(entry.tags().eq(expected.tag_pairs()));
        }
    }

    #[test]
    fn decoding_is_idempotent(builder in cache_strategy(6)) {
        let bytes = builder.build();
        let layout = builder.layout();
        prop_assert_eq!(render(&bytes, layout).unwrap(), render(&bytes, layout).unwrap());
    }

    #[test]
    fn arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..512)) {
        for layout in LAYOUTS {
            fuzz_records(&data, layout);
        }
    }
}
