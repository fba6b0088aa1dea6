//! Error types shared across the player.
//!
//! `AudioError` covers the decode/output capability; everything else that
//! can stop the player surfaces as a `PlayerError`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::playlist::TrackIndex;

/// Failures of the decode+output capability for a single track.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("cannot open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {}: {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("audio output unavailable: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("audio output stalled for {0:?}")]
    Stalled(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum PlayerError {
    /// Bad command line; the message is the usage text.
    #[error("{0}")]
    Usage(String),
    #[error("no songs found in {}", .0.display())]
    NoTracks(PathBuf),
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),
    #[error("GPIO pin {pin}: {source}")]
    Gpio {
        pin: u32,
        #[source]
        source: io::Error,
    },
    #[error("failed to start playback thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("playback thread for track {0} panicked")]
    PlaybackPanicked(TrackIndex),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
