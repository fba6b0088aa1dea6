//! The playback thread's body.
//!
//! STARTING opens the stream, STREAMING moves one buffer per step and
//! checks the transport on both sides of it, STOPPING drops the stream.
//! Whatever happens, the thread signals `track_finished` on its way out.

use tracing::{debug, error, info};

use crate::library::Track;
use crate::playlist::TrackIndex;
use crate::transport::{Transport, TransportCmd};

use super::types::{AudioBackend, AudioStream, PlaybackOutcome, PlaybackPhase};

/// Sets `track_finished` when dropped, including while unwinding.
struct FinishOnDrop<'a>(&'a Transport);

impl Drop for FinishOnDrop<'_> {
    fn drop(&mut self) {
        self.0.mark_finished();
    }
}

pub(super) fn run_playback(
    index: TrackIndex,
    track: &Track,
    backend: &dyn AudioBackend,
    transport: &Transport,
) -> PlaybackOutcome {
    let _finish = FinishOnDrop(transport);
    debug!(index, phase = ?PlaybackPhase::Starting);
    let outcome = match backend.open(track) {
        Ok(mut stream) => {
            debug!(index, phase = ?PlaybackPhase::Streaming);
            let outcome = stream_track(stream.as_mut(), transport);
            debug!(index, phase = ?PlaybackPhase::Stopping);
            drop(stream);
            outcome
        }
        Err(err) => {
            error!(index, path = %track.path.display(), error = %err, "cannot start track");
            PlaybackOutcome::Failed(err)
        }
    };

    debug!(index, phase = ?PlaybackPhase::Done, outcome = ?outcome);
    outcome
}

fn stream_track(stream: &mut dyn AudioStream, transport: &Transport) -> PlaybackOutcome {
    let mut buffers = 0usize;
    loop {
        let cmd = if transport.command() == TransportCmd::Pause {
            // Silence what is already queued, not just the next buffer.
            stream.pause();
            debug!(buffers, "paused");
            let cmd = transport.await_not_paused();
            stream.resume();
            cmd
        } else {
            transport.await_not_paused()
        };
        if cmd.is_terminal() {
            return PlaybackOutcome::Interrupted(cmd);
        }

        match stream.read_next_buffer() {
            Ok(Some(buffer)) => {
                if let Err(err) = stream.write(buffer) {
                    error!(error = %err, "audio output failed");
                    return PlaybackOutcome::Failed(err);
                }
                buffers += 1;
            }
            Ok(None) => {
                stream.drain();
                info!(buffers, "track completed");
                return PlaybackOutcome::Completed;
            }
            Err(err) => {
                error!(error = %err, "decode failed");
                return PlaybackOutcome::Failed(err);
            }
        }

        let cmd = transport.command();
        if cmd.is_terminal() {
            return PlaybackOutcome::Interrupted(cmd);
        }
    }
}
