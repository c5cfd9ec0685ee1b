//! Logging setup
//!
//! Stdout plus a daily rolling file under the data directory. `RUST_LOG`
//! overrides the default `info` level.

use crate::helpers::get_or_create_data_dir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FILE_PREFIX: &str = "secrets-gui.log";

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process. `None` means file logging is unavailable and
/// only stdout is active.
pub fn init() -> Option<WorkerGuard> {
    let stdout_layer = fmt::layer().with_timer(LocalTime::rfc_3339());

    let log_dir = match get_or_create_data_dir() {
        Ok(dir) => Some(dir.join("logs")),
        Err(e) => {
            eprintln!("secrets-gui: file logging disabled: {e}");
            None
        }
    };

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(stdout_layer)
            .init();
        return None;
    };

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_ansi(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stdout_layer)
        .with(file_layer)
        .init();

    tracing::debug!(dir = %log_dir.display(), "File logging enabled");
    Some(guard)
}
