//! Keyboard Actions and Shortcuts
//!
//! Defines global keyboard shortcuts and action dispatching.

use gpui::{Action, KeyBinding};
use schemars::JsonSchema;
use serde::Deserialize;

/// Menu actions (application-level)
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, JsonSchema, Action)]
pub enum MenuAction {
    /// Quit the application
    Quit,
}

/// Navigation actions
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, JsonSchema, Action)]
pub enum NavAction {
    /// Go to the home view
    Home,
    /// Open the settings view
    Settings,
    /// Return to the previously shown view
    Back,
}

/// Convert a keystroke string to human-readable format
///
/// Platform-specific formatting:
/// - macOS: ⌘ for cmd, ⌥ for alt, ⌃ for ctrl, ⇧ for shift
/// - Others: Ctrl+, Alt+, Shift+
pub fn humanize_keystroke(keystroke: &str) -> String {
    #[cfg(target_os = "macos")]
    let separator = "";
    #[cfg(not(target_os = "macos"))]
    let separator = "+";

    keystroke
        .split('-')
        .map(|part| match part {
            "secondary" | "cmd" => platform_symbol("⌘", "Ctrl").to_string(),
            "ctrl" => platform_symbol("⌃", "Ctrl").to_string(),
            "alt" => platform_symbol("⌥", "Alt").to_string(),
            "shift" => platform_symbol("⇧", "Shift").to_string(),
            "left" => "←".to_string(),
            "escape" => "Esc".to_string(),
            other => other.to_uppercase(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn platform_symbol(mac: &'static str, other: &'static str) -> &'static str {
    if cfg!(target_os = "macos") { mac } else { other }
}

/// Create global keyboard bindings
pub fn new_key_bindings() -> Vec<KeyBinding> {
    vec![
        // Application
        KeyBinding::new("secondary-q", MenuAction::Quit, None),
        // Navigation
        KeyBinding::new("secondary-,", NavAction::Settings, None),
        KeyBinding::new("alt-left", NavAction::Back, None),
    ]
}
