//! Track discovery and tag reading.
//!
//! Builds the playlist from a directory scan or an explicit file list, and
//! extracts title/artist/album/genre for the track about to play.

pub(crate) mod model;
mod scan;
mod tags;

pub use model::Track;
pub use scan::{playlist_from_dir, playlist_from_files, scan};
pub use tags::{RawTags, extract_metadata, read_tags};
