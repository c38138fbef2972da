//! Synthetic cache encoder.
//!
//! Writes cache images byte for byte the way the music player lays them out,
//! for any [`CacheLayout`]. Builders also expose knobs for producing broken
//! records (wrong declared size, missing terminator) so decoder error paths
//! can be exercised.

use cmuscache_core::{expected_header, ByteOrder, CacheEntry, CacheLayout, HEADER_SIZE};

/// Builder for one cache record.
///
/// # Example
///
/// ```rust
/// use cmuscache_testkit::EntryBuilder;
/// use cmuscache_core::CacheLayout;
///
/// let bytes = EntryBuilder::new("/music/a.mp3")
///     .tag("title", "Song")
///     .play_count(5)
///     .duration(245)
///     .encode(CacheLayout::native());
/// assert_eq!(&bytes[80..93], b"/music/a.mp3\0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBuilder {
    filename: Vec<u8>,
    internal: [Vec<u8>; 2],
    /// Strings after the internal ones, keys and values interleaved.
    tail: Vec<Vec<u8>>,
    play_count: i32,
    mtime: i64,
    duration: i32,
    bitrate: i32,
    bpm: i32,
    declared_size: Option<u32>,
    terminated: bool,
}

impl EntryBuilder {
    /// Creates a record for `filename` with empty internal strings and no
    /// tags.
    pub fn new(filename: impl AsRef<[u8]>) -> Self {
        Self {
            filename: filename.as_ref().to_vec(),
            internal: [Vec::new(), Vec::new()],
            tail: Vec::new(),
            play_count: 0,
            mtime: 0,
            duration: 0,
            bitrate: 0,
            bpm: 0,
            declared_size: None,
            terminated: true,
        }
    }

    /// Sets the two format-internal strings.
    #[must_use]
    pub fn internal(mut self, first: impl AsRef<[u8]>, second: impl AsRef<[u8]>) -> Self {
        self.internal = [first.as_ref().to_vec(), second.as_ref().to_vec()];
        self
    }

    /// Appends a `(key, value)` tag pair.
    #[must_use]
    pub fn tag(mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Self {
        self.tail.push(key.as_ref().to_vec());
        self.tail.push(value.as_ref().to_vec());
        self
    }

    /// Appends all pairs from `tags`.
    #[must_use]
    pub fn tags<K, V>(self, tags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        tags.into_iter().fold(self, |b, (k, v)| b.tag(k, v))
    }

    /// Appends a single string after the tags, leaving it unpaired.
    #[must_use]
    pub fn dangling_key(mut self, key: impl AsRef<[u8]>) -> Self {
        self.tail.push(key.as_ref().to_vec());
        self
    }

    /// Sets the play count.
    #[must_use]
    pub fn play_count(mut self, play_count: i32) -> Self {
        self.play_count = play_count;
        self
    }

    /// Sets the modification time.
    #[must_use]
    pub fn mtime(mut self, mtime: i64) -> Self {
        self.mtime = mtime;
        self
    }

    /// Sets the duration in seconds.
    #[must_use]
    pub fn duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the bitrate.
    #[must_use]
    pub fn bitrate(mut self, bitrate: i32) -> Self {
        self.bitrate = bitrate;
        self
    }

    /// Sets the beats per minute.
    #[must_use]
    pub fn bpm(mut self, bpm: i32) -> Self {
        self.bpm = bpm;
        self
    }

    /// Overrides the size field instead of using the encoded length.
    #[must_use]
    pub fn declared_size(mut self, size: u32) -> Self {
        self.declared_size = Some(size);
        self
    }

    /// Drops the terminator after the last string.
    #[must_use]
    pub fn unterminated(mut self) -> Self {
        self.terminated = false;
        self
    }

    /// Returns the filename.
    pub fn filename(&self) -> &[u8] {
        &self.filename
    }

    /// Returns the tag pairs in stored order. An unpaired final key is not
    /// included.
    pub fn tag_pairs(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.tail
            .chunks_exact(2)
            .map(|pair| (pair[0].as_slice(), pair[1].as_slice()))
    }

    /// Returns the numeric prefix fields as
    /// `(play_count, mtime, duration, bitrate, bpm)`.
    pub fn numbers(&self) -> (i32, i64, i32, i32, i32) {
        (
            self.play_count,
            self.mtime,
            self.duration,
            self.bitrate,
            self.bpm,
        )
    }

    /// Encodes the record without trailing padding.
    pub fn encode(&self, layout: CacheLayout) -> Vec<u8> {
        let mut region = Vec::new();
        let strings = std::iter::once(&self.filename)
            .chain(&self.internal)
            .chain(&self.tail);
        for s in strings {
            region.extend_from_slice(s);
            region.push(0);
        }
        if !self.terminated {
            region.pop();
        }

        let len = CacheEntry::PREFIX_SIZE + region.len();
        let size = self
            .declared_size
            .unwrap_or_else(|| u32::try_from(len).expect("record too large"));

        let mut buf = Vec::with_capacity(len);
        let order = layout.byte_order;
        put(&mut buf, order, size.to_le_bytes(), size.to_be_bytes());
        put(&mut buf, order, self.play_count.to_le_bytes(), self.play_count.to_be_bytes());
        put(&mut buf, order, self.mtime.to_le_bytes(), self.mtime.to_be_bytes());
        put(&mut buf, order, self.duration.to_le_bytes(), self.duration.to_be_bytes());
        put(&mut buf, order, self.bitrate.to_le_bytes(), self.bitrate.to_be_bytes());
        put(&mut buf, order, self.bpm.to_le_bytes(), self.bpm.to_be_bytes());
        buf.resize(CacheEntry::PREFIX_SIZE, 0);
        buf.extend_from_slice(&region);
        buf
    }
}

fn put<const N: usize>(buf: &mut Vec<u8>, order: ByteOrder, le: [u8; N], be: [u8; N]) {
    match order {
        ByteOrder::Little => buf.extend_from_slice(&le),
        ByteOrder::Big => buf.extend_from_slice(&be),
    }
}

/// Builder for a whole cache image.
///
/// # Example
///
/// ```rust
/// use cmuscache_testkit::{CacheBuilder, EntryBuilder};
/// use cmuscache_core::{CacheFile, Config};
///
/// let bytes = CacheBuilder::native()
///     .entry(EntryBuilder::new("/a.mp3"))
///     .entry(EntryBuilder::new("/b.mp3"))
///     .build();
/// let cache = CacheFile::parse(&bytes, &Config::default()).unwrap();
/// assert_eq!(cache.entries().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheBuilder {
    layout: CacheLayout,
    header: [u8; HEADER_SIZE],
    entries: Vec<EntryBuilder>,
    pad: bool,
    trailing: Vec<u8>,
}

impl CacheBuilder {
    /// Creates an empty cache for `layout`.
    pub fn new(layout: CacheLayout) -> Self {
        Self {
            layout,
            header: expected_header(layout),
            entries: Vec::new(),
            pad: true,
            trailing: Vec::new(),
        }
    }

    /// Creates an empty cache for the running platform.
    pub fn native() -> Self {
        Self::new(CacheLayout::native())
    }

    /// Returns the layout records are encoded with.
    pub fn layout(&self) -> CacheLayout {
        self.layout
    }

    /// Replaces the header bytes.
    #[must_use]
    pub fn header(mut self, header: [u8; HEADER_SIZE]) -> Self {
        self.header = header;
        self
    }

    /// Appends a record.
    #[must_use]
    pub fn entry(mut self, entry: EntryBuilder) -> Self {
        self.entries.push(entry);
        self
    }

    /// Appends several records.
    #[must_use]
    pub fn entries(mut self, entries: impl IntoIterator<Item = EntryBuilder>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Leaves out the padding after the final record.
    #[must_use]
    pub fn unpadded_tail(mut self) -> Self {
        self.pad = false;
        self
    }

    /// Appends raw bytes after the last record.
    #[must_use]
    pub fn trailing_bytes(mut self, bytes: &[u8]) -> Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    /// Returns the records added so far.
    pub fn entry_builders(&self) -> &[EntryBuilder] {
        &self.entries
    }

    /// Returns the absolute file offset of every record.
    pub fn offsets(&self) -> Vec<u64> {
        let mut at = HEADER_SIZE;
        let mut offsets = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            offsets.push(at as u64);
            at += self.padded_len(entry.encode(self.layout).len());
        }
        offsets
    }

    /// Encodes the full cache image.
    pub fn build(&self) -> Vec<u8> {
        let mut bytes = self.header.to_vec();
        let last = self.entries.len().saturating_sub(1);
        for (i, entry) in self.entries.iter().enumerate() {
            let record = entry.encode(self.layout);
            let padded = if i == last && !self.pad {
                record.len()
            } else {
                self.padded_len(record.len())
            };
            bytes.extend_from_slice(&record);
            bytes.resize(bytes.len() + padded - record.len(), 0);
        }
        bytes.extend_from_slice(&self.trailing);
        bytes
    }

    fn padded_len(&self, len: usize) -> usize {
        self.layout.align(len).expect("record length overflows")
    }
}
