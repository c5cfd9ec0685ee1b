//! State Management Layer
//!
//! Centralized application state using GPUI's Entity system.
//! Follows a unidirectional data flow pattern:
//!
//! ```text
//! UI Action → State Method → spawn Store Call → State Update → notify → UI Refresh
//! ```

mod app;
mod i18n;
mod secrets;

pub use app::*;
pub use i18n::*;
pub use secrets::*;
