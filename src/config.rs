//! Player settings: audio buffering, buttons and keyboard, the character
//! display, library scanning and logging. Loaded from `LCDPLAY__*`
//! environment variables layered over `config.toml`.

mod load;
mod schema;

pub use load::default_log_dir;
pub use schema::*;
