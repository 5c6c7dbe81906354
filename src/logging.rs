//! Tracing subscriber setup.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TM_LOG=debug`.
pub const LOG_ENV: &str = "TM_LOG";

/// Install the global subscriber. With `log_file` set, output is appended there
/// instead of stderr so it cannot draw over the terminal UI.
pub fn init(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let file = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Cannot open log file {}: {e}", path.display()))
            .ok()
    });

    // try_init: a second call (tests, re-entry) keeps the first subscriber.
    let _ = match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
        None => builder.with_writer(std::io::stderr).try_init(),
    };
}
