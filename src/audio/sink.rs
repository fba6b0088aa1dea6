//! `rodio` implementation of the decode+output capability.
//!
//! Each opened track gets its own output stream and `Sink`; decoded
//! samples are handed to the sink in small `SamplesBuffer`s so that the
//! playback thread keeps control between buffers.

use std::fs::File;
use std::io::BufReader;
use std::thread;
use std::time::{Duration, Instant};

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::config::AudioSettings;
use crate::error::AudioError;
use crate::library::Track;

use super::types::{AudioBackend, AudioBuffer, AudioStream};

/// How often a full queue is re-checked while `write` waits.
const QUEUE_POLL: Duration = Duration::from_millis(5);

/// Extra buffer periods `write` waits past a full queue before giving up.
const STALL_BUFFERS: u32 = 4;

/// Floor for the stall deadline, for tiny buffers.
const MIN_STALL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct RodioBackend {
    buffer_frames: usize,
    queued_buffers: usize,
}

impl RodioBackend {
    pub fn new(settings: &AudioSettings) -> Self {
        Self {
            buffer_frames: settings.buffer_frames.max(1),
            queued_buffers: settings.queued_buffers.max(1),
        }
    }
}

impl AudioBackend for RodioBackend {
    fn open(&self, track: &Track) -> Result<Box<dyn AudioStream>, AudioError> {
        let file = File::open(&track.path).map_err(|source| AudioError::Open {
            path: track.path.clone(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            path: track.path.clone(),
            source,
        })?;

        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // Keep stderr clean under the status screen.
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());

        debug!(
            path = %track.path.display(),
            channels = decoder.channels(),
            sample_rate = decoder.sample_rate(),
            "opened track"
        );
        Ok(Box::new(RodioStream {
            decoder,
            sink,
            _stream: stream,
            buffer_frames: self.buffer_frames,
            queued_buffers: self.queued_buffers,
        }))
    }
}

struct RodioStream {
    decoder: Decoder<BufReader<File>>,
    // Declared before the stream so it is dropped first.
    sink: Sink,
    _stream: OutputStream,
    buffer_frames: usize,
    queued_buffers: usize,
}

impl AudioStream for RodioStream {
    fn read_next_buffer(&mut self) -> Result<Option<AudioBuffer>, AudioError> {
        let channels = self.decoder.channels();
        let sample_rate = self.decoder.sample_rate();
        let wanted = self.buffer_frames * usize::from(channels.max(1));
        let samples: Vec<f32> = self.decoder.by_ref().take(wanted).collect();
        if samples.is_empty() {
            return Ok(None);
        }
        Ok(Some(AudioBuffer {
            channels,
            sample_rate,
            samples,
        }))
    }

    fn write(&mut self, buffer: AudioBuffer) -> Result<(), AudioError> {
        let periods = u32::try_from(self.queued_buffers)
            .unwrap_or(u32::MAX)
            .saturating_add(STALL_BUFFERS);
        let limit = buffer.duration().saturating_mul(periods).max(MIN_STALL);
        self.sink.append(SamplesBuffer::new(
            buffer.channels,
            buffer.sample_rate,
            buffer.samples,
        ));

        wait_for_room(|| self.sink.len(), self.queued_buffers, limit)
    }

    fn drain(&mut self) {
        self.sink.sleep_until_end();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn resume(&mut self) {
        self.sink.play();
    }
}

impl Drop for RodioStream {
    fn drop(&mut self) {
        self.sink.stop();
    }
}

/// Sleep until `queued()` is down to `max`, failing once `limit` has passed.
fn wait_for_room(
    queued: impl Fn() -> usize,
    max: usize,
    limit: Duration,
) -> Result<(), AudioError> {
    let deadline = Instant::now() + limit;
    while queued() > max {
        if Instant::now() >= deadline {
            return Err(AudioError::Stalled(limit));
        }
        thread::sleep(QUEUE_POLL);
    }
    Ok(())
}
