//! Audio playback.
//!
//! A `PlaybackThread` streams one track through an `AudioBackend`,
//! obeying the shared `Transport`; `RodioBackend` is the real backend.

mod player;
mod sink;
mod thread;
mod types;

pub use player::PlaybackThread;
pub use sink::RodioBackend;
pub use types::{AudioBackend, AudioBuffer, AudioStream, PlaybackOutcome, PlaybackPhase};
