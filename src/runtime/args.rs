//! Command-line parsing.

use std::path::PathBuf;

use crate::config::ButtonPins;
use crate::error::PlayerError;
use crate::input::ButtonId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    /// Explicit files, played in the order given.
    Files(Vec<PathBuf>),
    /// Every audio file in a directory.
    Dir(PathBuf),
}

impl PlaylistSource {
    pub fn label(&self) -> String {
        match self {
            PlaylistSource::Files(files) => format!("{} song(s) from the command line", files.len()),
            PlaylistSource::Dir(dir) => dir.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Play(PlaylistSource),
}

pub const USAGE: &str = "Usage: lcdplay [--help] [--dir DIR | --songs FILE... | DIR]";

/// Parse the arguments that follow the program name.
///
/// With no arguments the current directory is played.
pub fn parse_args<I>(args: I) -> Result<Invocation, PlayerError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let Some(first) = args.first() else {
        return Ok(Invocation::Play(PlaylistSource::Dir(PathBuf::from("."))));
    };
    let rest = &args[1..];

    match first.as_str() {
        "--help" | "-h" => Ok(Invocation::Help),
        "--songs" | "-songs" => {
            if rest.is_empty() {
                return Err(usage("--songs needs at least one file"));
            }
            let files = rest.iter().map(PathBuf::from).collect();
            Ok(Invocation::Play(PlaylistSource::Files(files)))
        }
        "--dir" | "-dir" => match rest {
            [dir] => Ok(Invocation::Play(PlaylistSource::Dir(PathBuf::from(dir)))),
            [] => Err(usage("--dir needs a directory")),
            _ => Err(usage("--dir takes exactly one directory")),
        },
        opt if opt.starts_with('-') => Err(usage(&format!("unknown option {opt}"))),
        dir if rest.is_empty() => Ok(Invocation::Play(PlaylistSource::Dir(PathBuf::from(dir)))),
        _ => Err(usage("too many arguments")),
    }
}

fn usage(problem: &str) -> PlayerError {
    PlayerError::Usage(format!("{problem}\n{USAGE}"))
}

/// Full `--help` text, including which GPIO pin each button is read from.
pub fn help_text(pins: &ButtonPins) -> String {
    let mut out = String::new();
    out.push_str(USAGE);
    out.push_str("\n\n");
    out.push_str("  --dir DIR         play every audio file in DIR (default: current directory)\n");
    out.push_str("  --songs FILE...   play the given files in order\n");
    out.push_str("  --help            show this help\n\n");
    out.push_str("Pins for buttons:\nButton\tBCM\n");
    for id in ButtonId::ALL {
        out.push_str(&format!("{}\t{}\n", id.label(), id.pin(pins)));
    }
    out.push_str("\nKeys: space play/pause, n next, p previous, i artist/album, q quit\n");
    out
}
