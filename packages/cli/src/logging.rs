use anyhow::{anyhow, Result};
use crossterm::{cursor, execute, terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Where log lines go
#[derive(Debug, Clone, PartialEq)]
pub enum LogTarget {
    Stderr,
    /// Append to a file; used while the TUI owns the terminal
    File(PathBuf),
}

/// Install the global subscriber. An unparsable filter falls back to `info`.
pub fn init_logging(filter: &str, target: LogTarget) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

/// Route panics through tracing.
///
/// With [`LogTarget::File`] the TUI owns the terminal: the hook leaves raw
/// mode and the alternate screen, and the report goes to the log file only.
/// Otherwise the default hook still prints to stderr afterwards.
pub fn install_panic_hook(target: &LogTarget) {
    let default_hook = std::panic::take_hook();
    let tui = matches!(target, LogTarget::File(_));
    std::panic::set_hook(Box::new(move |info| {
        if tui {
            restore_terminal();
        }
        error!("Unhandled panic: {}", info);
        if !tui {
            default_hook(info);
        }
    }));
}

/// Best effort; a panic hook has nowhere to report failures
fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
}
