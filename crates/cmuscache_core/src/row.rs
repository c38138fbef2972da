//! Output rows.

use crate::entry::CacheEntry;
use crate::tags::MetadataField;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, Write};

/// Header line of the TSV output.
pub const TSV_HEADER: &str = "Filename\tTitle\tArtist\tGenre\tAlbum\tAlbumArtist\tTrack\tDuration\tDuration(s)\tPlay count\tComment\n";

/// Writes [`TSV_HEADER`] to `out`.
///
/// # Errors
///
/// Returns any error from `out`.
pub fn write_tsv_header<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.write_all(TSV_HEADER.as_bytes())
}

/// Formats a duration in seconds as `MM:SS`.
///
/// Minutes are not rolled over into hours, so an hour-long track reads
/// `60:00`.
#[must_use]
pub fn format_duration(secs: i32) -> String {
    if secs < 60 {
        format!("00:{secs:02}")
    } else {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// One fully-populated output row.
///
/// Text fields borrow from the cache image when they are valid UTF-8 and
/// are converted lossily otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRow<'a> {
    /// Absolute path of the track file.
    pub filename: Cow<'a, str>,
    /// `title` tag.
    pub title: Cow<'a, str>,
    /// `artist` tag.
    pub artist: Cow<'a, str>,
    /// `genre` tag.
    pub genre: Cow<'a, str>,
    /// `album` tag.
    pub album: Cow<'a, str>,
    /// `albumartist` tag, or the artist if absent.
    pub albumartist: Cow<'a, str>,
    /// `tracknumber` tag.
    pub track: Cow<'a, str>,
    /// Duration as `MM:SS`.
    pub duration: String,
    /// Duration in seconds.
    pub duration_secs: i32,
    /// Play count.
    pub play_count: i32,
    /// `comment` tag.
    pub comment: Cow<'a, str>,
}

impl<'a> TrackRow<'a> {
    /// Builds the row for `entry`.
    #[must_use]
    pub fn from_entry(entry: &CacheEntry<'a>) -> Self {
        let tags = entry.track_tags();
        let text = |field| String::from_utf8_lossy(tags.get(field));

        Self {
            filename: String::from_utf8_lossy(entry.filename()),
            title: text(MetadataField::Title),
            artist: text(MetadataField::Artist),
            genre: text(MetadataField::Genre),
            album: text(MetadataField::Album),
            albumartist: text(MetadataField::AlbumArtist),
            track: text(MetadataField::Track),
            duration: format_duration(entry.duration),
            duration_secs: entry.duration,
            play_count: entry.play_count,
            comment: text(MetadataField::Comment),
        }
    }

    /// Writes the row as one TSV line, newline included.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn write_tsv<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.filename,
            self.title,
            self.artist,
            self.genre,
            self.album,
            self.albumartist,
            self.track,
            self.duration,
            self.duration_secs,
            self.play_count,
            self.comment,
        )
    }

    /// Returns the row as one TSV line, newline included.
    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_tsv(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
