//! File-based logging module for renderer-remote
//!
//! This module sets up tracing-based logging that writes to a file instead of stdout,
//! since the application uses a TUI that occupies the terminal.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_FILE_PREFIX: &str = "renderer-remote";

/// Initialize the logging system.
///
/// Logs are written to `<log_dir>/renderer-remote.YYYY-MM-DD.log` with daily rotation.
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// Default log levels:
/// - `renderer_remote` modules: DEBUG
/// - `reqwest`: INFO
/// - Other crates: WARN
pub fn init_logging(log_dir: &Path) -> anyhow::Result<()> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    // Non-blocking so a slow disk never stalls the poll loop
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the guard alive for the lifetime of the application
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("renderer_remote=debug,reqwest=info,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", log_dir.display());

    Ok(())
}

/// Log the outcome of a device request
#[macro_export]
macro_rules! log_command_result {
    ($method:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::trace!(method = $method, "Device request succeeded"),
            Err(e) => tracing::debug!(method = $method, error = %e, "Device request returned an error"),
        }
    };
}

/// Log a device request with additional context
#[macro_export]
macro_rules! log_command_request {
    ($method:expr, $($field:tt)*) => {
        tracing::debug!(method = $method, $($field)*, "Device request started");
    };
}
