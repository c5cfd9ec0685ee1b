//! Secrets GUI - Main Entry Point
//!
//! Desktop settings app for API keys and other secrets

use secrets_gui::app::application::run_app;

fn main() {
    let _log_guard = secrets_gui::logging::init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Secrets GUI...");

    // Run the GPUI application
    run_app();
}
