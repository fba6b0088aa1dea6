//! Transport control shared between the control loop and the playback thread.
//!
//! `Transport` is the single piece of mutable state both threads see. The
//! control loop steers playback through `issue`; the playback thread
//! observes it once per buffer and reports back through `mark_finished`.

mod metadata;
mod state;
mod types;

pub use metadata::*;
pub use state::*;
pub use types::*;

#[cfg(test)]
mod tests;
