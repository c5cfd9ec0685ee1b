//! Internationalization Helpers
//!
//! Provides convenient functions for translating strings based on current locale.

use super::AppStore;
use gpui::{App, SharedString};
use rust_i18n::t;

/// Get translated string from "common" namespace
pub fn i18n_common(cx: &App, key: &str) -> SharedString {
    let locale = cx.global::<AppStore>().read(cx).locale();
    t!(format!("common.{key}"), locale = locale).into()
}

/// Get translated string from "home" namespace
pub fn i18n_home(cx: &App, key: &str) -> SharedString {
    let locale = cx.global::<AppStore>().read(cx).locale();
    t!(format!("home.{key}"), locale = locale).into()
}

/// Get translated string from "settings" namespace
pub fn i18n_settings(cx: &App, key: &str) -> SharedString {
    let locale = cx.global::<AppStore>().read(cx).locale();
    t!(format!("settings.{key}"), locale = locale).into()
}

/// Get translated string from "secrets" namespace
pub fn i18n_secrets(cx: &App, key: &str) -> SharedString {
    let locale = cx.global::<AppStore>().read(cx).locale();
    t!(format!("secrets.{key}"), locale = locale).into()
}

/// Format a translated string with arguments
///
/// # Example
/// ```ignore
/// // With translation `count: "%{count} secrets stored"`
/// i18n_format(cx, "secrets.count", &[("count", "3")])
/// // Returns "3 secrets stored"
/// ```
pub fn i18n_format(cx: &App, key: &str, args: &[(&str, &str)]) -> SharedString {
    let locale = cx.global::<AppStore>().read(cx).locale();
    fill_placeholders(&t!(key, locale = locale), args).into()
}

/// Replace `%{name}` placeholders with their values
fn fill_placeholders(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (name, value) in args {
        result = result.replace(&format!("%{{{name}}}"), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_label_translations() {
        assert_eq!(t!("settings.exit", locale = "en"), "Exit");
        assert_eq!(t!("settings.exit", locale = "zh"), "退出");
    }

    #[test]
    fn fill_placeholders_replaces_all_args() {
        let text = fill_placeholders("%{count} of %{total}", &[("count", "2"), ("total", "5")]);
        assert_eq!(text, "2 of 5");
    }

    #[test]
    fn description_matches_lookup_order() {
        let text = t!("secrets.description", locale = "en");
        assert!(text.contains("environment variable"));
        assert!(text.contains("precedence over the stored value"));
    }

    #[test]
    fn secrets_count_template() {
        let template = t!("secrets.count", locale = "en");
        assert_eq!(fill_placeholders(&template, &[("count", "3")]), "3 stored");
    }
}
