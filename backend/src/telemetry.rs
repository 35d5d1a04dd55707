//! Structured logging to stdout and an append-only log file.
//!
//! Stdout carries JSON lines for collectors; the file gets plain text with
//! RFC 3339 UTC timestamps. `RUST_LOG` overrides the default `info` filter.

use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Split `path` into the directory and file name the appender expects.
fn split_log_path(path: &Path) -> Option<(PathBuf, &std::ffi::OsStr)> {
    let file_name = path.file_name()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, file_name))
}

/// Open `path` for appending, creating missing directories.
///
/// Returns `None` when the path has no file name or cannot be opened as a
/// file, for example when it names a directory.
fn open_log_file(path: &Path) -> Option<RollingFileAppender> {
    let (dir, file_name) = split_log_path(path)?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .ok()
}

/// Install the global subscriber.
///
/// Returns the file writer's guard; keep it alive for the life of the
/// process or buffered lines are lost. When the file cannot be opened the
/// service still logs to stdout and `None` is returned.
pub fn init_logging(log_file: &Path) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stdout_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_timer(UtcTime::rfc_3339());

    let (file_layer, guard) = match open_log_file(log_file) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let initialised = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();
    if let Err(err) = initialised {
        warn!(error = %err, "tracing init failed");
    } else if guard.is_none() {
        warn!(path = %log_file.display(), "log file unavailable; logging to stdout only");
    }
    guard
}
