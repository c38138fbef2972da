//! Projection of free-form tags onto the fixed output fields.

/// A metadata field surfaced in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    /// `title`
    Title,
    /// `artist`
    Artist,
    /// `genre`
    Genre,
    /// `album`
    Album,
    /// `albumartist`
    AlbumArtist,
    /// `tracknumber`
    Track,
    /// `comment`
    Comment,
}

impl MetadataField {
    /// All fields, in output column order.
    pub const ALL: [Self; 7] = [
        Self::Title,
        Self::Artist,
        Self::Genre,
        Self::Album,
        Self::AlbumArtist,
        Self::Track,
        Self::Comment,
    ];

    /// Returns the tag key this field is stored under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Genre => "genre",
            Self::Album => "album",
            Self::AlbumArtist => "albumartist",
            Self::Track => "tracknumber",
            Self::Comment => "comment",
        }
    }

    /// Looks up the field stored under `key`. Matching is case-sensitive.
    #[must_use]
    pub fn from_key(key: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().as_bytes() == key)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Known tag values of one record.
///
/// Every field starts out absent. Absent fields read as empty, except
/// `albumartist`, which falls back to `artist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackTags<'a> {
    values: [Option<&'a [u8]>; MetadataField::ALL.len()],
}

impl<'a> TrackTags<'a> {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects `(key, value)` pairs. Unknown keys are skipped; a repeated
    /// key keeps its last value.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
    {
        let mut tags = Self::new();
        for (key, value) in pairs {
            tags.insert(key, value);
        }
        tags
    }

    /// Stores `value` under `key` if the key is known.
    ///
    /// Returns the field it was stored in.
    pub fn insert(&mut self, key: &[u8], value: &'a [u8]) -> Option<MetadataField> {
        let field = MetadataField::from_key(key)?;
        self.set(field, value);
        Some(field)
    }

    /// Sets `field` to `value`.
    pub fn set(&mut self, field: MetadataField, value: &'a [u8]) {
        self.values[field.index()] = Some(value);
    }

    /// Returns the value stored for `field`, without fallbacks.
    #[must_use]
    pub fn raw(&self, field: MetadataField) -> Option<&'a [u8]> {
        self.values[field.index()]
    }

    /// Returns the value to display for `field`.
    #[must_use]
    pub fn get(&self, field: MetadataField) -> &'a [u8] {
        match (field, self.raw(field)) {
            (_, Some(value)) => value,
            (MetadataField::AlbumArtist, None) => self.get(MetadataField::Artist),
            (_, None) => b"",
        }
    }
}
