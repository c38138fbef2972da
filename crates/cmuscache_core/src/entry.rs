//! Cache entry records.
//!
//! Layout of one record (all integers in the layout's byte order):
//! ```text
//! [0..4]    size        u32, total record length including this prefix
//! [4..8]    play_count  i32
//! [8..16]   mtime       i64
//! [16..20]  duration    i32, seconds
//! [20..24]  bitrate     i32
//! [24..28]  bpm         i32
//! [28..80]  reserved
//! [80..size] strings    NUL-terminated: filename, two internal strings,
//!                       then alternating tag keys and values
//! ```
//!
//! Records are padded to the next word boundary. The number of tag pairs is
//! not stored; it follows from the number of terminators in the string
//! region.

use crate::error::{CacheError, CacheResult};
use crate::layout::CacheLayout;
use crate::row::TrackRow;
use crate::tags::TrackTags;
use std::iter::FusedIterator;

/// Number of leading strings before the tag pairs.
const LEADING_STRINGS: usize = 3;

/// A decoded view of one record.
///
/// Borrows its strings from the cache image; nothing is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry<'a> {
    /// Absolute file offset of the record.
    pub offset: u64,
    /// Declared record length, including the prefix.
    pub size: u32,
    /// Number of times the track was played.
    pub play_count: i32,
    /// Modification time of the track file.
    pub mtime: i64,
    /// Track length in seconds.
    pub duration: i32,
    /// Bitrate in bits per second.
    pub bitrate: i32,
    /// Beats per minute.
    pub bpm: i32,
    filename: &'a [u8],
    internal: [&'a [u8]; 2],
    tag_region: &'a [u8],
    pair_count: usize,
}

impl<'a> CacheEntry<'a> {
    /// Bytes of the prefix that carry fields.
    pub const USED_SIZE: usize = 28;
    /// Bytes of the prefix reserved for future fields.
    pub const RESERVED_SIZE: usize = 52;
    /// Size of the fixed prefix before the strings.
    pub const PREFIX_SIZE: usize = Self::USED_SIZE + Self::RESERVED_SIZE;

    /// Decodes the record starting at `at` within `body`.
    ///
    /// `base` is the absolute file offset of `body[0]` and only feeds the
    /// offsets reported in the entry and in errors.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Truncated`] if fewer than [`Self::PREFIX_SIZE`] bytes
    ///   remain at `at`.
    /// - [`CacheError::MalformedRecord`] if the declared size is smaller than
    ///   the prefix or runs past `body`, if the string region does not end in
    ///   a terminator, or if it holds fewer than three strings.
    pub fn decode(body: &'a [u8], at: usize, layout: CacheLayout, base: u64) -> CacheResult<Self> {
        let offset = base.saturating_add(at as u64);
        let available = body.len().saturating_sub(at);

        let prefix = at
            .checked_add(Self::PREFIX_SIZE)
            .and_then(|end| body.get(at..end))
            .ok_or(CacheError::Truncated {
                offset,
                needed: Self::PREFIX_SIZE,
                available,
            })?;

        // The prefix slice is exactly PREFIX_SIZE bytes, so these reads only
        // fail if the offsets below drift from the layout.
        let out_of_range = || CacheError::malformed_record(offset, "prefix field out of range");
        let size = layout.u32_at(prefix, 0).ok_or_else(out_of_range)?;
        let play_count = layout.i32_at(prefix, 4).ok_or_else(out_of_range)?;
        let mtime = layout.i64_at(prefix, 8).ok_or_else(out_of_range)?;
        let duration = layout.i32_at(prefix, 16).ok_or_else(out_of_range)?;
        let bitrate = layout.i32_at(prefix, 20).ok_or_else(out_of_range)?;
        let bpm = layout.i32_at(prefix, 24).ok_or_else(out_of_range)?;

        let len = size as usize;
        if len < Self::PREFIX_SIZE {
            return Err(CacheError::malformed_record(
                offset,
                format!(
                    "declared size {len} is smaller than the {}-byte prefix",
                    Self::PREFIX_SIZE
                ),
            ));
        }
        let region = at
            .checked_add(len)
            .and_then(|end| body.get(at + Self::PREFIX_SIZE..end))
            .ok_or_else(|| {
                CacheError::malformed_record(
                    offset,
                    format!("declared size {len} exceeds the {available} bytes left"),
                )
            })?;

        let strings = region.strip_suffix(b"\0").ok_or_else(|| {
            CacheError::malformed_record(offset, "string region is not NUL-terminated")
        })?;
        let string_count = region.iter().filter(|&&b| b == 0).count();
        if string_count < LEADING_STRINGS {
            return Err(CacheError::malformed_record(
                offset,
                format!("expected at least {LEADING_STRINGS} strings, found {string_count}"),
            ));
        }

        // `strings` lost its final terminator, so the third split may consume
        // the whole remainder; the fallbacks cover that case.
        let (filename, rest) = split_cstr(strings).unwrap_or((strings, &[][..]));
        let (first, rest) = split_cstr(rest).unwrap_or((rest, &[][..]));
        let (second, tag_region) = split_cstr(rest).unwrap_or((rest, &[][..]));
        let pair_count = (string_count - LEADING_STRINGS) / 2;

        Ok(Self {
            offset,
            size,
            play_count,
            mtime,
            duration,
            bitrate,
            bpm,
            filename,
            internal: [first, second],
            tag_region,
            pair_count,
        })
    }

    /// Returns the absolute path of the track file.
    #[must_use]
    pub fn filename(&self) -> &'a [u8] {
        self.filename
    }

    /// Returns the two format-internal strings that follow the filename.
    #[must_use]
    pub fn internal_strings(&self) -> [&'a [u8]; 2] {
        self.internal
    }

    /// Returns the number of tag pairs in the record.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Iterates over the raw `(key, value)` tag pairs in stored order.
    #[must_use]
    pub fn tags(&self) -> TagPairs<'a> {
        TagPairs {
            rest: self.tag_region,
            remaining: self.pair_count,
        }
    }

    /// Projects the tags onto the known fields.
    #[must_use]
    pub fn track_tags(&self) -> TrackTags<'a> {
        TrackTags::from_pairs(self.tags())
    }

    /// Builds the output row for this record.
    #[must_use]
    pub fn to_row(&self) -> TrackRow<'a> {
        TrackRow::from_entry(self)
    }

    /// Returns the number of bytes from this record's start to the next
    /// record's start, or `None` on overflow.
    #[must_use]
    pub fn stride(&self, layout: CacheLayout) -> Option<usize> {
        layout.align(self.size as usize)
    }
}

/// Iterator over the `(key, value)` tag pairs of a record.
#[derive(Debug, Clone)]
pub struct TagPairs<'a> {
    rest: &'a [u8],
    remaining: usize,
}

impl<'a> Iterator for TagPairs<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let (key, rest) = split_cstr(self.rest)?;
        // The final value lost its terminator when the region was trimmed.
        let (value, rest) = split_cstr(rest).unwrap_or((rest, &[][..]));
        self.rest = rest;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl FusedIterator for TagPairs<'_> {}

/// Splits `bytes` at the first NUL into the string and what follows it.
fn split_cstr(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let nul = bytes.iter().position(|&b| b == 0)?;
    Some((&bytes[..nul], &bytes[nul + 1..]))
}
