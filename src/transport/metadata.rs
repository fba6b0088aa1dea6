//! Current-track metadata with bounded text fields.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::library::RawTags;
use crate::library::model::base_filename;

/// Substituted for any tag that is missing or blank.
pub const FALLBACK_TEXT: &str = "UNKNOWN";

/// Upper bound, in bytes, for every metadata text field.
pub const MAX_TEXT_BYTES: usize = 200;

/// A string that never exceeds `MAX_TEXT_BYTES`; longer input is cut at a
/// character boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundedText(String);

impl BoundedText {
    pub fn new(text: &str) -> Self {
        let mut end = text.len().min(MAX_TEXT_BYTES);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        Self(text[..end].to_string())
    }

    /// Trimmed `text`, or `fallback` when it is absent or blank.
    pub fn or_fallback(text: Option<&str>, fallback: &str) -> Self {
        match text.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Self::new(s),
            None => Self::new(fallback),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which field the second display row shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SecondaryRow {
    #[default]
    Artist,
    Album,
}

impl SecondaryRow {
    pub fn toggled(self) -> Self {
        match self {
            Self::Artist => Self::Album,
            Self::Album => Self::Artist,
        }
    }
}

/// Metadata of the track being played. Every text field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: BoundedText,
    pub artist: BoundedText,
    pub album: BoundedText,
    pub genre: BoundedText,
    pub path: PathBuf,
    pub base_filename: BoundedText,
    pub secondary: SecondaryRow,
}

impl TrackMetadata {
    /// Shown between tracks, before anything is known about the next one.
    pub fn placeholder(secondary: SecondaryRow) -> Self {
        let unknown = BoundedText::new(FALLBACK_TEXT);
        Self {
            title: unknown.clone(),
            artist: unknown.clone(),
            album: unknown.clone(),
            genre: unknown.clone(),
            path: PathBuf::new(),
            base_filename: unknown,
            secondary,
        }
    }

    /// Build metadata for `path` from extracted tags, applying fallbacks:
    /// the title falls back to the file name, everything else to `UNKNOWN`.
    pub fn from_tags(path: &Path, tags: RawTags, secondary: SecondaryRow) -> Self {
        let base_filename = BoundedText::or_fallback(Some(base_filename(path)), FALLBACK_TEXT);
        Self {
            title: BoundedText::or_fallback(tags.title.as_deref(), base_filename.as_str()),
            artist: BoundedText::or_fallback(tags.artist.as_deref(), FALLBACK_TEXT),
            album: BoundedText::or_fallback(tags.album.as_deref(), FALLBACK_TEXT),
            genre: BoundedText::or_fallback(tags.genre.as_deref(), FALLBACK_TEXT),
            path: path.to_path_buf(),
            base_filename,
            secondary,
        }
    }

    /// Text for the second display row (artist or album).
    pub fn secondary_text(&self) -> &str {
        match self.secondary {
            SecondaryRow::Artist => self.artist.as_str(),
            SecondaryRow::Album => self.album.as_str(),
        }
    }
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self::placeholder(SecondaryRow::default())
    }
}
