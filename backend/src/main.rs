//! Service entry point: reads settings, wires adapters, and serves `/v1/sql`.

mod server;

use std::ffi::OsString;
use std::io;
use std::path::Path;

use actix_web::web;
use tracing::{error, info, warn};

use server::{ServerConfig, build_http_state, create_server};
use sqlqa::config::{DEFAULT_LOG_FILE, Settings, SettingsError};
use sqlqa::inbound::http::health::HealthState;
use sqlqa::telemetry::init_logging;

/// Read settings from `args` and the environment.
///
/// The configured log file is unknown until settings load, so a failure is
/// logged at `error` to stdout and `fallback_log` before it is returned.
fn load_settings<I, T>(args: I, fallback_log: &Path) -> io::Result<Settings>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Settings::load_from_iter(args) {
        Ok(settings) => Ok(settings),
        Err(SettingsError::Arguments(err)) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _log_guard = init_logging(fallback_log);
            error!(error = %err, "invalid configuration");
            Err(io::Error::other(format!("invalid configuration: {err}")))
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let dotenv = dotenvy::dotenv();
    let settings = load_settings(std::env::args_os(), Path::new(DEFAULT_LOG_FILE))?;
    let _log_guard = init_logging(&settings.log_file);
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable .env"),
    }

    let http_state = build_http_state(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(settings.bind_addr, http_state),
    )?;
    info!(bind_addr = %settings.bind_addr, "listening");
    server.await
}
