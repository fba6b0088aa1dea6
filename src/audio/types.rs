//! The decode+output capability and the playback thread's vocabulary.
//!
//! A backend opens one stream per track. The playback thread pulls decoded
//! buffers from the stream and pushes them straight back into it for
//! output; dropping the stream releases the decoder and the device.

use std::time::Duration;

use crate::error::AudioError;
use crate::library::Track;
use crate::transport::TransportCmd;

/// One decode unit of interleaved samples.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    pub fn frames(&self) -> usize {
        match self.channels {
            0 => 0,
            n => self.samples.len() / usize::from(n),
        }
    }

    /// Playing time of this buffer.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate))
    }
}

/// Opens tracks for playback. Shared between the control loop and each
/// playback thread, so it must be thread-safe.
pub trait AudioBackend: Send + Sync {
    fn open(&self, track: &Track) -> Result<Box<dyn AudioStream>, AudioError>;
}

/// An opened track. Closed on drop.
pub trait AudioStream {
    /// Decode the next buffer. `Ok(None)` is the end of the stream.
    fn read_next_buffer(&mut self) -> Result<Option<AudioBuffer>, AudioError>;

    /// Queue one buffer for output. May block, but only for a bounded time.
    fn write(&mut self, buffer: AudioBuffer) -> Result<(), AudioError>;

    /// Wait for queued output to finish after the last buffer.
    fn drain(&mut self) {}

    /// Hold output that is already queued.
    fn pause(&mut self) {}

    fn resume(&mut self) {}
}

/// How a playback thread ended.
#[derive(Debug)]
pub enum PlaybackOutcome {
    /// The stream ran out.
    Completed,
    /// A terminal command was observed at a buffer boundary.
    Interrupted(TransportCmd),
    /// The stream could not be opened, decoded or written.
    Failed(AudioError),
}

/// Where the playback thread is; only used for logging.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackPhase {
    Starting,
    Streaming,
    Stopping,
    Done,
}
