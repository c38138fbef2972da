//! Platform layout of a cache file.
//!
//! cmus writes its cache by dumping in-memory structs, so integer byte order
//! and record alignment follow the machine that wrote it. A [`CacheLayout`]
//! names those two properties; decoding always goes through one explicitly.

/// Width of a machine word, which sets record alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSize {
    /// 32-bit words.
    Four,
    /// 64-bit words.
    Eight,
}

impl WordSize {
    /// Returns the word width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// Byte order of multi-byte integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

/// Word size and byte order a cache was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheLayout {
    /// Record alignment.
    pub word_size: WordSize,
    /// Integer byte order.
    pub byte_order: ByteOrder,
}

impl CacheLayout {
    /// Creates a layout.
    #[must_use]
    pub const fn new(word_size: WordSize, byte_order: ByteOrder) -> Self {
        Self {
            word_size,
            byte_order,
        }
    }

    /// Returns the layout of the running platform.
    #[must_use]
    pub const fn native() -> Self {
        let word_size = if cfg!(target_pointer_width = "64") {
            WordSize::Eight
        } else {
            WordSize::Four
        };
        let byte_order = if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        };
        Self::new(word_size, byte_order)
    }

    /// Rounds `len` up to the next word boundary.
    ///
    /// Returns `None` if the result overflows `usize`.
    #[must_use]
    pub const fn align(self, len: usize) -> Option<usize> {
        let mask = self.word_size.bytes() - 1;
        match len.checked_add(mask) {
            Some(padded) => Some(padded & !mask),
            None => None,
        }
    }

    /// Reads a `u32` at `at`, or `None` if it would run past `bytes`.
    #[must_use]
    pub fn u32_at(self, bytes: &[u8], at: usize) -> Option<u32> {
        let raw = array_at::<4>(bytes, at)?;
        Some(match self.byte_order {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        })
    }

    /// Reads an `i32` at `at`, or `None` if it would run past `bytes`.
    #[must_use]
    pub fn i32_at(self, bytes: &[u8], at: usize) -> Option<i32> {
        let raw = array_at::<4>(bytes, at)?;
        Some(match self.byte_order {
            ByteOrder::Little => i32::from_le_bytes(raw),
            ByteOrder::Big => i32::from_be_bytes(raw),
        })
    }

    /// Reads an `i64` at `at`, or `None` if it would run past `bytes`.
    #[must_use]
    pub fn i64_at(self, bytes: &[u8], at: usize) -> Option<i64> {
        let raw = array_at::<8>(bytes, at)?;
        Some(match self.byte_order {
            ByteOrder::Little => i64::from_le_bytes(raw),
            ByteOrder::Big => i64::from_be_bytes(raw),
        })
    }
}

impl Default for CacheLayout {
    fn default() -> Self {
        Self::native()
    }
}

fn array_at<const N: usize>(bytes: &[u8], at: usize) -> Option<[u8; N]> {
    bytes.get(at..at.checked_add(N)?)?.try_into().ok()
}
