//! Lazy iteration over the records of a cache body.

use crate::entry::CacheEntry;
use crate::error::{CacheError, CacheResult};
use crate::layout::CacheLayout;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// A forward, single-pass iterator over the records of a cache body.
///
/// Each step decodes the record at the cursor and advances the cursor by the
/// record's size rounded up to the word boundary. The stream ends cleanly
/// when the cursor reaches the end of the body. The first error is yielded
/// once and ends the stream; there is no resynchronisation.
///
/// # Example
///
/// ```ignore
/// for entry in RecordStream::new(body, layout, HEADER_SIZE as u64) {
///     let entry = entry?;
///     // Render entry...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RecordStream<'a> {
    /// Bytes following the header.
    body: &'a [u8],
    /// Absolute file offset of `body[0]`.
    base: u64,
    /// Cursor within `body`.
    cursor: usize,
    layout: CacheLayout,
    /// Records left before the limit is reached.
    remaining: Option<usize>,
    /// Set after the end or the first error.
    finished: bool,
}

impl<'a> RecordStream<'a> {
    /// Creates a stream over `body`, whose first byte sits at file offset
    /// `base`.
    #[must_use]
    pub fn new(body: &'a [u8], layout: CacheLayout, base: u64) -> Self {
        Self {
            body,
            base,
            cursor: 0,
            layout,
            remaining: None,
            finished: false,
        }
    }

    /// Stops the stream after `limit` records.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.remaining = limit;
        self
    }

    /// Returns the cursor position within the body.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn fail(&mut self, err: CacheError) -> Option<CacheResult<CacheEntry<'a>>> {
        debug!(offset = self.base.saturating_add(self.cursor as u64), error = %err, "decode aborted");
        self.finished = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for RecordStream<'a> {
    type Item = CacheResult<CacheEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.cursor >= self.body.len() || self.remaining == Some(0) {
            self.finished = true;
            return None;
        }

        let entry = match CacheEntry::decode(self.body, self.cursor, self.layout, self.base) {
            Ok(entry) => entry,
            Err(err) => return self.fail(err),
        };

        let Some(next) = entry
            .stride(self.layout)
            .and_then(|stride| self.cursor.checked_add(stride))
        else {
            let err = CacheError::malformed_record(entry.offset, "record stride overflows");
            return self.fail(err);
        };

        trace!(
            offset = entry.offset,
            size = entry.size,
            pairs = entry.pair_count(),
            "record"
        );
        self.cursor = next;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(Ok(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let left = self.body.len().saturating_sub(self.cursor);
        let most = left.div_ceil(CacheEntry::PREFIX_SIZE);
        (0, Some(self.remaining.map_or(most, |r| r.min(most))))
    }
}

impl FusedIterator for RecordStream<'_> {}
