//! Ordered, indexed collection of tracks.
//!
//! Entries are kept sorted by index. Indices need not be contiguous, and
//! inserting at an index that already exists replaces that entry. Lookups
//! are a linear scan that stops as soon as a larger index is seen, which is
//! plenty for playlists of a few hundred tracks.

use crate::library::Track;

/// Position of a track in the playlist. Playlists built by the scanner start at 1.
pub type TrackIndex = u32;

#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: Vec<(TrackIndex, Track)>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `track` at `index`, keeping ascending order.
    ///
    /// Returns the track previously stored at `index`, if any.
    pub fn add_or_replace(&mut self, index: TrackIndex, track: Track) -> Option<Track> {
        let mut insert_at = self.entries.len();
        for (pos, (i, existing)) in self.entries.iter_mut().enumerate() {
            if *i == index {
                return Some(std::mem::replace(existing, track));
            }
            if *i > index {
                insert_at = pos;
                break;
            }
        }
        self.entries.insert(insert_at, (index, track));
        None
    }

    /// Track at `index`, or `None` when nothing is stored there.
    pub fn get(&self, index: TrackIndex) -> Option<&Track> {
        for (i, track) in &self.entries {
            if *i == index {
                return Some(track);
            }
            if *i > index {
                break;
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first_index(&self) -> Option<TrackIndex> {
        self.entries.first().map(|(i, _)| *i)
    }

    pub fn last_index(&self) -> Option<TrackIndex> {
        self.entries.last().map(|(i, _)| *i)
    }

    /// Smallest stored index greater than `index`.
    pub fn next_index(&self, index: TrackIndex) -> Option<TrackIndex> {
        self.entries.iter().map(|(i, _)| *i).find(|&i| i > index)
    }

    /// Largest stored index smaller than `index`.
    pub fn prev_index(&self, index: TrackIndex) -> Option<TrackIndex> {
        self.entries
            .iter()
            .map(|(i, _)| *i)
            .take_while(|&i| i < index)
            .last()
    }

    /// 1-based ordinal of `index` within the playlist ("song 3 of 10").
    pub fn position(&self, index: TrackIndex) -> Option<usize> {
        self.entries
            .iter()
            .position(|(i, _)| *i == index)
            .map(|p| p + 1)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (TrackIndex, &Track)> {
        self.entries.iter().map(|(i, t)| (*i, t))
    }
}
