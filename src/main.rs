mod audio;
mod config;
mod display;
mod error;
mod input;
mod library;
mod logging;
mod playlist;
mod runtime;
mod transport;
mod ui;

use std::process::ExitCode;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lcdplay: {e}");
            ExitCode::FAILURE
        }
    }
}
