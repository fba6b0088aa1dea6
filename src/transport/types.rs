//! Transport commands and how a track ended.

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TransportCmd {
    /// Keep (or resume) streaming.
    #[default]
    Play,
    /// Hold the playback thread before its next buffer.
    Pause,
    /// Abandon the current track and move forward.
    Next,
    /// Abandon the current track and move back.
    Previous,
    /// Stop playback and shut the player down.
    Quit,
}

impl TransportCmd {
    /// Commands that end the current track and latch `track_finished`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Next | Self::Previous | Self::Quit)
    }
}

/// How the track that just finished came to an end, as seen by the control loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackEnd {
    /// Output ran out (or the track could not be played); move to the next one.
    Completed,
    /// NEXT or PREVIOUS interrupted the track; the control loop already moved.
    Skipped(TransportCmd),
    /// QUIT was issued.
    Quit,
}
