//! The control loop.
//!
//! Plays the playlist one track at a time: publish the track's metadata,
//! spawn its playback thread, follow it while polling input and driving
//! the display, join it, then decide where to go next. At most one
//! playback thread exists at any moment.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, PlaybackOutcome, PlaybackThread};
use crate::display::{LcdBuffer, LcdPanel};
use crate::error::PlayerError;
use crate::input::{ControlCmd, EventSource};
use crate::library::extract_metadata;
use crate::playlist::{Playlist, TrackIndex};
use crate::transport::{SecondaryRow, TrackEnd, Transport, TransportCmd};
use crate::ui::{Screen, StatusView};

/// Redraw the status screen at least this often even when nothing changed.
const RENDER_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Sleep between input polls. Shorter than the debounce settle time.
    pub poll_interval: Duration,
    /// What the second display row shows when a track starts.
    pub secondary: SecondaryRow,
    pub farewell_text: String,
    pub farewell_hold: Duration,
    /// Shown in the status header.
    pub source_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Index the loop was on when it stopped.
    pub final_index: TrackIndex,
    pub tracks_started: usize,
    /// Stopped by QUIT rather than by running off the end.
    pub quit: bool,
}

pub struct Session<'a> {
    playlist: &'a Playlist,
    transport: Arc<Transport>,
    backend: Arc<dyn AudioBackend>,
    sources: Vec<Box<dyn EventSource>>,
    panel: LcdPanel<LcdBuffer>,
    screen: &'a mut dyn Screen,
    options: SessionOptions,
}

impl<'a> Session<'a> {
    pub fn new(
        playlist: &'a Playlist,
        transport: Arc<Transport>,
        backend: Arc<dyn AudioBackend>,
        panel: LcdPanel<LcdBuffer>,
        screen: &'a mut dyn Screen,
        options: SessionOptions,
    ) -> Self {
        Self {
            playlist,
            transport,
            backend,
            sources: Vec::new(),
            panel,
            screen,
            options,
        }
    }

    pub fn with_source(mut self, source: Box<dyn EventSource>) -> Self {
        self.sources.push(source);
        self
    }

    #[cfg(test)]
    pub fn panel(&self) -> &LcdPanel<LcdBuffer> {
        &self.panel
    }

    /// Play from `start` until QUIT or the end of the playlist.
    pub fn run(&mut self, start: TrackIndex) -> Result<SessionSummary, PlayerError> {
        let playlist = self.playlist;
        let mut current = start;
        let mut tracks_started = 0;
        let mut quit = false;

        while let Some(track) = playlist.get(current) {
            let metadata = extract_metadata(track, self.options.secondary);
            info!(
                index = current,
                path = %track.path.display(),
                title = %metadata.title,
                "starting track"
            );
            self.panel
                .show_track(metadata.title.as_str(), metadata.secondary_text());
            self.transport.replace_metadata(metadata);
            // Resume in case a pause landed after the previous track's last buffer.
            self.transport.issue(TransportCmd::Play);

            let player = PlaybackThread::spawn(
                current,
                track.clone(),
                self.backend.clone(),
                self.transport.clone(),
            )?;
            tracks_started += 1;

            let followed = self.follow(&player, &mut current);
            if followed.is_err() {
                // Don't leave the playback thread running behind an error.
                self.transport.issue(TransportCmd::Quit);
            }
            let playing = player.index();
            let joined = player.join();
            followed?;
            match joined {
                Ok(PlaybackOutcome::Failed(err)) => {
                    warn!(index = playing, error = %err, "skipping track");
                }
                Ok(_) => {}
                // The thread still signalled finished; treat it like a failed track.
                Err(err @ PlayerError::PlaybackPanicked(_)) => {
                    warn!(index = playing, error = %err, "skipping track");
                }
                Err(err) => return Err(err),
            }

            match self.transport.rearm() {
                TrackEnd::Quit => {
                    quit = true;
                    break;
                }
                TrackEnd::Skipped(cmd) => {
                    debug!(from = playing, to = current, ?cmd, "skipped");
                }
                TrackEnd::Completed => match playlist.next_index(current) {
                    Some(next) => current = next,
                    None => break,
                },
            }
        }

        info!(final_index = current, tracks_started, quit, "playback finished");
        self.farewell(current)?;
        Ok(SessionSummary {
            final_index: current,
            tracks_started,
            quit,
        })
    }

    /// Poll input and drive the display until the playing track is done.
    fn follow(
        &mut self,
        player: &PlaybackThread,
        current: &mut TrackIndex,
    ) -> Result<(), PlayerError> {
        let mut last_render: Option<Instant> = None;
        loop {
            if self.transport.take_and_clear_finished() || player.is_finished() {
                return Ok(());
            }

            let now = Instant::now();
            let mut pending = Vec::new();
            for source in &mut self.sources {
                pending.extend(source.poll(now)?);
            }
            let mut dirty = false;
            for cmd in pending {
                dirty |= self.apply(cmd, current);
            }
            dirty |= self.panel.tick(now);

            if dirty || last_render.is_none_or(|at| now.duration_since(at) >= RENDER_INTERVAL) {
                self.render(player.index())?;
                last_render = Some(now);
            }

            self.transport.wait_finished(self.options.poll_interval);
        }
    }

    /// Act on one user command. Returns whether the screen needs a redraw.
    fn apply(&mut self, cmd: ControlCmd, current: &mut TrackIndex) -> bool {
        debug!(?cmd, index = *current, "control");
        match cmd {
            ControlCmd::PlayPause => {
                let now = self.transport.toggle_pause();
                info!(command = ?now, "play/pause");
                true
            }
            ControlCmd::Next => {
                self.skip(TransportCmd::Next, self.playlist.next_index(*current), current)
            }
            ControlCmd::Prev => {
                self.skip(TransportCmd::Previous, self.playlist.prev_index(*current), current)
            }
            ControlCmd::Info => {
                let text = self.transport.toggle_secondary_row();
                self.panel.show_secondary(&text);
                true
            }
            ControlCmd::Quit => {
                info!("quit requested");
                self.transport.issue(TransportCmd::Quit)
            }
        }
    }

    /// Move to `target` if there is one and the transport accepts `cmd`.
    fn skip(
        &self,
        cmd: TransportCmd,
        target: Option<TrackIndex>,
        current: &mut TrackIndex,
    ) -> bool {
        let Some(target) = target else {
            debug!(?cmd, index = *current, "no track in that direction");
            return false;
        };
        if !self.transport.issue(cmd) {
            return false;
        }
        info!(?cmd, from = *current, to = target, "skip");
        *current = target;
        true
    }

    fn render(&mut self, playing: TrackIndex) -> Result<(), PlayerError> {
        let snapshot = self.transport.snapshot();
        let lcd = self.panel.display().lines();
        let view = StatusView {
            song_number: self.playlist.position(playing).unwrap_or(0),
            total: self.playlist.len(),
            metadata: &snapshot.metadata,
            command: snapshot.command,
            lcd: &lcd,
            source: &self.options.source_label,
        };
        self.screen.render(&view)
    }

    fn farewell(&mut self, last: TrackIndex) -> Result<(), PlayerError> {
        self.panel.farewell(&self.options.farewell_text);
        self.render(last)?;
        if !self.options.farewell_hold.is_zero() {
            thread::sleep(self.options.farewell_hold);
        }
        self.panel.clear();
        Ok(())
    }
}
