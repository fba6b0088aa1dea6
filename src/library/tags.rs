//! Tag extraction through `lofty`.
//!
//! Extraction never fails: unreadable files or missing tags just leave the
//! fields empty and `TrackMetadata::from_tags` fills in the fallbacks.

use std::path::Path;

use lofty::prelude::{Accessor, TaggedFileExt};
use tracing::debug;

use crate::transport::{SecondaryRow, TrackMetadata};

use super::model::Track;

/// Raw tag values as found in the file; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
}

pub fn read_tags(path: &Path) -> RawTags {
    let tagged = match lofty::read_from_path(path) {
        Ok(tagged) => tagged,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no readable tags");
            return RawTags::default();
        }
    };

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return RawTags::default();
    };

    RawTags {
        title: tag.title().map(|v| v.into_owned()),
        artist: tag.artist().map(|v| v.into_owned()),
        album: tag.album().map(|v| v.into_owned()),
        genre: tag.genre().map(|v| v.into_owned()),
    }
}

/// Read `track`'s tags and build display-ready metadata.
pub fn extract_metadata(track: &Track, secondary: SecondaryRow) -> TrackMetadata {
    TrackMetadata::from_tags(&track.path, read_tags(&track.path), secondary)
}
