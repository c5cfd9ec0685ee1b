//! Home View
//!
//! Landing screen with the entry point into settings plus theme and
//! language switches.

use crate::helpers::{NavAction, humanize_keystroke};
use crate::states::{AppStore, LocaleAction, ThemeAction, i18n_home};
use gpui::{Context, FontWeight, Window, prelude::*};
use gpui_component::{
    ActiveTheme, IconName, Sizable, ThemeMode,
    button::{Button, ButtonVariants},
    h_flex,
    label::Label,
    v_flex,
};

/// Home screen
pub struct HomeView;

impl HomeView {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self
    }
}

impl Render for HomeView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let store = cx.global::<AppStore>().read(cx);
        let (locale, theme) = (store.locale().to_string(), store.theme());

        let settings_tooltip = format!(
            "{} ({})",
            i18n_home(cx, "open_settings"),
            humanize_keystroke("secondary-,")
        );

        let (next_locale, locale_label) = if locale == "zh" {
            (LocaleAction::En, "English")
        } else {
            (LocaleAction::Zh, "中文")
        };

        let is_dark = match theme {
            Some(mode) => mode == ThemeMode::Dark,
            None => cx.theme().is_dark(),
        };
        let (next_theme, theme_icon) = if is_dark {
            (ThemeAction::Light, IconName::Sun)
        } else {
            (ThemeAction::Dark, IconName::Moon)
        };

        v_flex()
            .size_full()
            .items_center()
            .justify_center()
            .gap_4()
            .bg(cx.theme().background)
            .child(
                Label::new(i18n_home(cx, "title"))
                    .text_2xl()
                    .font_weight(FontWeight::SEMIBOLD),
            )
            .child(
                Label::new(i18n_home(cx, "subtitle"))
                    .text_sm()
                    .text_color(cx.theme().muted_foreground),
            )
            .child(
                Button::new("open-settings")
                    .primary()
                    .icon(IconName::Settings)
                    .label(i18n_home(cx, "open_settings"))
                    .tooltip(settings_tooltip)
                    .on_click(|_, window, cx| {
                        window.dispatch_action(Box::new(NavAction::Settings), cx);
                    }),
            )
            .child(
                h_flex()
                    .gap_2()
                    .child(
                        Button::new("toggle-locale")
                            .ghost()
                            .small()
                            .label(locale_label)
                            .on_click(move |_, window, cx| {
                                window.dispatch_action(Box::new(next_locale), cx);
                            }),
                    )
                    .child(
                        Button::new("toggle-theme")
                            .ghost()
                            .small()
                            .icon(theme_icon)
                            .tooltip(i18n_home(cx, "theme"))
                            .on_click(move |_, window, cx| {
                                window.dispatch_action(Box::new(next_theme), cx);
                            }),
                    ),
            )
    }
}
