use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter; overrides `log.level`.
pub const LOG_ENV: &str = "AGENDA_LOG";

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to an append-only file. Used by the terminal UI, which owns stderr.
pub fn init_file_logging(path: &Path, level: &str) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Log to stderr. Used by one-shot CLI commands.
pub fn init_stderr_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
