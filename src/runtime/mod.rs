use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::audio::{AudioBackend, RodioBackend};
use crate::display::{LcdBuffer, LcdPanel};
use crate::error::PlayerError;
use crate::logging;
use crate::transport::Transport;
use crate::ui::{Headless, Screen, TerminalScreen};

mod args;
mod session;
mod settings;
mod startup;


pub use args::{Invocation, PlaylistSource, parse_args};
pub use session::{Session, SessionOptions, SessionSummary};

/// LCD rows driven by the panel.
const LCD_ROWS: usize = 2;

pub fn run() -> Result<(), PlayerError> {
    let settings = settings::load_settings();

    let source = match parse_args(env::args().skip(1))? {
        Invocation::Help => {
            println!("{}", args::help_text(&settings.controls.pins));
            return Ok(());
        }
        Invocation::Play(source) => source,
    };

    // Logging is best-effort; the guard flushes on drop.
    let _log_guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("lcdplay: {e}");
            None
        }
    };

    let playlist = startup::build_playlist(&source, &settings.library)?;
    let Some(start) = playlist.first_index() else {
        return Err(PlayerError::NoTracks(PathBuf::from(source.label())));
    };

    let transport = Arc::new(Transport::new());
    let backend: Arc<dyn AudioBackend> = Arc::new(RodioBackend::new(&settings.audio));
    let sources = startup::event_sources(&settings.controls, Instant::now())?;
    let panel = LcdPanel::new(
        LcdBuffer::new(settings.display.columns, LCD_ROWS),
        startup::panel_layout(&settings.display),
    );
    let options = startup::session_options(&settings, &source);

    let play = |screen: &mut dyn Screen| -> Result<SessionSummary, PlayerError> {
        let mut session = Session::new(
            &playlist,
            transport.clone(),
            backend.clone(),
            panel,
            screen,
            options,
        );
        for source in sources {
            session = session.with_source(source);
        }
        session.run(start)
    };

    let result = if settings.controls.keyboard {
        let mut screen = TerminalScreen::enter()?;
        let result = play(&mut screen);
        screen.leave()?;
        result
    } else {
        info!("running headless");
        play(&mut Headless)
    };

    match &result {
        Ok(summary) => info!(?summary, "session ended"),
        Err(e) => error!(error = %e, "session failed"),
    }
    result.map(|_| ())
}
