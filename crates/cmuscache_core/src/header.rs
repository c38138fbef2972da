//! Cache file header.
//!
//! Layout (8 bytes):
//! ```text
//! [0..3]  magic     b"CTC"
//! [3]     reserved  0x00
//! [4]     version   CACHE_VERSION
//! [5..8]  flags     24-bit big-endian HeaderFlags
//! ```
//!
//! The flags describe the layout of the machine that wrote the cache. A
//! cache is only readable on a machine with the same layout, so validation
//! compares the whole header byte for byte.

use crate::error::{CacheError, CacheResult};
use crate::layout::{ByteOrder, CacheLayout, WordSize};
use tracing::{debug, trace};

/// Magic bytes at the start of every cache file.
pub const CACHE_MAGIC: [u8; 3] = *b"CTC";

/// The only supported cache format version.
pub const CACHE_VERSION: u8 = 0x0d;

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 8;

/// Platform flags stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderFlags(u32);

impl HeaderFlags {
    /// No flags set: 32-bit little-endian.
    pub const NONE: Self = Self(0);
    /// Written with 64-bit words.
    pub const WORD_64: Self = Self(0x01);
    /// Written big-endian.
    pub const BIG_ENDIAN: Self = Self(0x02);

    /// Returns the flags describing `layout`.
    #[must_use]
    pub const fn for_layout(layout: CacheLayout) -> Self {
        let mut bits = 0;
        if matches!(layout.word_size, WordSize::Eight) {
            bits |= Self::WORD_64.0;
        }
        if matches!(layout.byte_order, ByteOrder::Big) {
            bits |= Self::BIG_ENDIAN.0;
        }
        Self(bits)
    }

    /// Returns the raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Checks if the 64-bit word flag is set.
    #[must_use]
    pub const fn is_word_64(self) -> bool {
        self.0 & Self::WORD_64.0 != 0
    }

    /// Checks if the big-endian flag is set.
    #[must_use]
    pub const fn is_big_endian(self) -> bool {
        self.0 & Self::BIG_ENDIAN.0 != 0
    }
}

/// Builds the header a cache written with `layout` starts with.
#[must_use]
pub const fn expected_header(layout: CacheLayout) -> [u8; HEADER_SIZE] {
    let flags = HeaderFlags::for_layout(layout).bits().to_be_bytes();
    [
        CACHE_MAGIC[0],
        CACHE_MAGIC[1],
        CACHE_MAGIC[2],
        0,
        CACHE_VERSION,
        flags[1],
        flags[2],
        flags[3],
    ]
}

/// Validates the header at the start of `bytes` against `layout`.
///
/// Input shorter than a header holds no records and is accepted.
///
/// # Errors
///
/// Returns [`CacheError::CorruptHeader`] if the first [`HEADER_SIZE`] bytes
/// differ from [`expected_header`] in any position.
pub fn validate(bytes: &[u8], layout: CacheLayout) -> CacheResult<()> {
    let Some(actual) = bytes
        .get(..HEADER_SIZE)
        .and_then(|head| <[u8; HEADER_SIZE]>::try_from(head).ok())
    else {
        trace!(len = bytes.len(), "input shorter than header, no records");
        return Ok(());
    };

    let expected = expected_header(layout);
    if actual != expected {
        debug!(?expected, ?actual, "header mismatch");
        return Err(CacheError::CorruptHeader { expected, actual });
    }

    trace!(?layout, "header valid");
    Ok(())
}
