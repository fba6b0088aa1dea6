use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::PlayerError;
use crate::library::Track;
use crate::playlist::TrackIndex;
use crate::transport::Transport;

use super::thread::run_playback;
use super::types::{AudioBackend, PlaybackOutcome};

/// Handle to the one playback thread of the current track.
///
/// Must be joined before the next track's thread is spawned.
pub struct PlaybackThread {
    index: TrackIndex,
    handle: JoinHandle<PlaybackOutcome>,
}

impl PlaybackThread {
    pub fn spawn(
        index: TrackIndex,
        track: Track,
        backend: Arc<dyn AudioBackend>,
        transport: Arc<Transport>,
    ) -> Result<Self, PlayerError> {
        let handle = thread::Builder::new()
            .name("playback".into())
            .spawn(move || run_playback(index, &track, backend.as_ref(), &transport))
            .map_err(PlayerError::Spawn)?;
        Ok(Self { index, handle })
    }

    pub fn index(&self) -> TrackIndex {
        self.index
    }

    /// True once the thread has returned (or panicked).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> Result<PlaybackOutcome, PlayerError> {
        self.handle
            .join()
            .map_err(|_| PlayerError::PlaybackPanicked(self.index))
    }
}
