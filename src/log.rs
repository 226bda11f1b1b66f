// src/log.rs
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::uptime;

// Re-exported for the logf!/logd!/logw!/loge! macros.
pub use tracing;

/// Default debug log location used by the CLI when `--log-file` is given
/// without a value.
pub const LOG_FILE: &str = ".store/debug.log";

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `verbosity` when set. Timestamps are elapsed time since
/// start. With `file`, output is appended there (parent dirs created) instead of
/// going to stderr, so progress lines on stderr stay readable.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbosity: u8, file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ufcstats_scrape={}", level_for(verbosity))));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(uptime())
        .with_target(false);

    let _ = match file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let f = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(f)).try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };
    Ok(())
}
