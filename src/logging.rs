//! Logging setup.
//!
//! Console output goes through [`tracing`] with a `LEVEL: message` format.
//! The default level is INFO; `--debug` lowers it to DEBUG, and the
//! `KONTOR_LOG` environment variable takes precedence over both.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter.
pub const LOG_ENV_VAR: &str = "KONTOR_LOG";

/// Install the global tracing subscriber.
///
/// Safe to call exactly once per process; subsequent calls are ignored so
/// that tests which exercise command entry points do not panic.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
