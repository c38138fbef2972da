//! Record encoding for unit tests.

use crate::entry::CacheEntry;
use crate::header::expected_header;
use crate::layout::{ByteOrder, CacheLayout, WordSize};

pub(crate) const LE64: CacheLayout = CacheLayout::new(WordSize::Eight, ByteOrder::Little);
pub(crate) const BE32: CacheLayout = CacheLayout::new(WordSize::Four, ByteOrder::Big);

/// Encodes one record without trailing padding.
pub(crate) fn record(layout: CacheLayout, play_count: i32, duration: i32, strings: &[&str]) -> Vec<u8> {
    let mut region = Vec::new();
    for s in strings {
        region.extend_from_slice(s.as_bytes());
        region.push(0);
    }
    let size = (CacheEntry::PREFIX_SIZE + region.len()) as u32;
    let big = layout.byte_order == ByteOrder::Big;
    let word = |v: i32| if big { v.to_be_bytes() } else { v.to_le_bytes() };
    let mtime = 1_700_000_000i64;

    let mut buf = Vec::new();
    buf.extend_from_slice(&if big { size.to_be_bytes() } else { size.to_le_bytes() });
    buf.extend_from_slice(&word(play_count));
    buf.extend_from_slice(&if big { mtime.to_be_bytes() } else { mtime.to_le_bytes() });
    buf.extend_from_slice(&word(duration));
    buf.extend_from_slice(&word(320_000));
    buf.extend_from_slice(&word(0));
    buf.resize(CacheEntry::PREFIX_SIZE, 0);
    buf.extend_from_slice(&region);
    buf
}

/// Appends `record` to `body` followed by padding to the word boundary.
pub(crate) fn push_padded(body: &mut Vec<u8>, layout: CacheLayout, record: &[u8]) {
    body.extend_from_slice(record);
    let padded = layout.align(record.len()).unwrap();
    body.resize(body.len() + padded - record.len(), 0);
}

/// A full cache image: header plus padded records.
pub(crate) fn image(layout: CacheLayout, records: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = expected_header(layout).to_vec();
    for rec in records {
        push_padded(&mut bytes, layout, rec);
    }
    bytes
}
