//! Tracing subscriber setup for binaries and tests embedding the board.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "TASKBOARD_LOG";

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs a formatted tracing subscriber.
///
/// The filter is read from [`LOG_ENV_VAR`], falling back to
/// `default_directive` (for example `"taskboard=debug"`).
///
/// # Errors
///
/// Returns [`TelemetryError::Install`] when a global subscriber has already
/// been set.
pub fn init_tracing(default_directive: &str) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
