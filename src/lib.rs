//! Secrets GUI Library
//!
//! Native settings screen for managing API keys and other secrets, with
//! values encrypted at rest and an environment-variable fallback.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod assets;
pub mod components;
pub mod error;
pub mod helpers;
pub mod logging;
pub mod secrets;
pub mod states;
pub mod views;
