//! The shared playback state and its command protocol.
//!
//! One `Transport` is shared (behind an `Arc`) by the control loop and the
//! playback thread. Every read or write of the command and the finished flag
//! happens under the same mutex. Two condition variables hang off it:
//! `resumed` parks the playback thread while paused, `finished` lets the
//! control loop sleep between input polls yet wake as soon as a track ends.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use super::metadata::TrackMetadata;
use super::types::{TrackEnd, TransportCmd};

#[derive(Debug, Default)]
struct TransportState {
    command: TransportCmd,
    track_finished: bool,
    metadata: TrackMetadata,
}

/// Consistent copy of the state for rendering.
#[derive(Debug, Clone)]
pub struct TransportSnapshot {
    pub command: TransportCmd,
    pub metadata: TrackMetadata,
}

#[derive(Debug, Default)]
pub struct Transport {
    state: Mutex<TransportState>,
    resumed: Condvar,
    finished: Condvar,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TransportState> {
        // The state stays consistent even if a holder panicked: every
        // mutation is a plain field assignment.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a transport command. Returns whether it took effect.
    ///
    /// PLAY only resumes from PAUSE and PAUSE only holds a playing track.
    /// NEXT/PREVIOUS end a playing or paused track; once one of them (or
    /// QUIT) is latched, only QUIT can replace it until `rearm`.
    pub fn issue(&self, cmd: TransportCmd) -> bool {
        let mut state = self.lock();
        let current = state.command;
        let accepted = match cmd {
            TransportCmd::Play => current == TransportCmd::Pause,
            TransportCmd::Pause => current == TransportCmd::Play,
            TransportCmd::Next | TransportCmd::Previous => !current.is_terminal(),
            TransportCmd::Quit => current != TransportCmd::Quit,
        };
        if !accepted {
            return false;
        }

        state.command = cmd;
        if cmd.is_terminal() {
            state.track_finished = true;
            self.finished.notify_all();
        }
        // A paused playback thread must observe both PLAY and the terminal commands.
        self.resumed.notify_all();
        drop(state);

        debug!(from = ?current, to = ?cmd, "transport command");
        true
    }

    /// Flip between PLAY and PAUSE atomically. Returns the resulting command.
    pub fn toggle_pause(&self) -> TransportCmd {
        let mut state = self.lock();
        match state.command {
            TransportCmd::Play => state.command = TransportCmd::Pause,
            TransportCmd::Pause => {
                state.command = TransportCmd::Play;
                self.resumed.notify_all();
            }
            _ => {}
        }
        debug!(command = ?state.command, "pause toggled");
        state.command
    }

    pub fn command(&self) -> TransportCmd {
        self.lock().command
    }

    /// Block until the command is anything but PAUSE and return it.
    ///
    /// The lock is released while waiting, so a paused player costs no CPU.
    pub fn await_not_paused(&self) -> TransportCmd {
        let state = self.lock();
        let state = self
            .resumed
            .wait_while(state, |s| s.command == TransportCmd::Pause)
            .unwrap_or_else(PoisonError::into_inner);
        state.command
    }

    /// Swap in the metadata of a track that is about to start.
    pub fn replace_metadata(&self, metadata: TrackMetadata) {
        self.lock().metadata = metadata;
    }

    #[cfg(test)]
    pub fn metadata(&self) -> TrackMetadata {
        self.lock().metadata.clone()
    }

    /// Switch the second display row between artist and album, returning the new text.
    pub fn toggle_secondary_row(&self) -> String {
        let mut state = self.lock();
        state.metadata.secondary = state.metadata.secondary.toggled();
        state.metadata.secondary_text().to_string()
    }

    pub fn snapshot(&self) -> TransportSnapshot {
        let state = self.lock();
        TransportSnapshot {
            command: state.command,
            metadata: state.metadata.clone(),
        }
    }

    /// Read and reset `track_finished` in one step, so each completion is seen once.
    pub fn take_and_clear_finished(&self) -> bool {
        std::mem::take(&mut self.lock().track_finished)
    }

    /// Sleep up to `timeout`, returning early once `track_finished` is set.
    /// Does not clear the flag.
    pub fn wait_finished(&self, timeout: Duration) -> bool {
        let state = self.lock();
        let (state, _) = self
            .finished
            .wait_timeout_while(state, timeout, |s| !s.track_finished)
            .unwrap_or_else(PoisonError::into_inner);
        state.track_finished
    }

    /// Called by the playback thread on its way out, whatever the reason.
    pub fn mark_finished(&self) {
        let mut state = self.lock();
        state.track_finished = true;
        self.finished.notify_all();
    }

    /// Prepare for the next track once the playback thread has been joined.
    ///
    /// Drops the thread's own finished signal, reports how the track ended
    /// and resets a NEXT/PREVIOUS back to PLAY with placeholder metadata.
    /// QUIT and PAUSE are left in place.
    pub fn rearm(&self) -> TrackEnd {
        let mut state = self.lock();
        state.track_finished = false;
        match state.command {
            TransportCmd::Quit => TrackEnd::Quit,
            cmd @ (TransportCmd::Next | TransportCmd::Previous) => {
                state.command = TransportCmd::Play;
                state.metadata = TrackMetadata::placeholder(state.metadata.secondary);
                TrackEnd::Skipped(cmd)
            }
            TransportCmd::Play | TransportCmd::Pause => TrackEnd::Completed,
        }
    }
}
