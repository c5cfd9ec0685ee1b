//! Settings View
//!
//! Full-height screen with an exit control in the header and the secrets
//! list as its only content.

use crate::app::navigation::{HistoryNavigator, NavigationState};
use crate::components::icons::ArrowLeftIcon;
use crate::states::{SecretsState, i18n_settings};
use crate::views::SecretsListView;
use gpui::{ClickEvent, Context, Entity, Window, div, prelude::*, px};
use gpui_component::{ActiveTheme, h_flex, v_flex};

/// Element id of the exit control
pub const EXIT_CONTROL_ID: &str = "settings-exit";

/// Debug selector of the main content area
pub const MAIN_CONTENT_SELECTOR: &str = "settings-main";

/// Content column width
const CONTENT_MAX_WIDTH: f32 = 896.0;

/// Leave the settings screen for whatever the navigator shows before it.
pub fn exit(navigator: &mut impl HistoryNavigator) {
    navigator.go_back();
}

/// Settings screen
pub struct SettingsView {
    navigation: Entity<NavigationState>,
    secrets_list: Entity<SecretsListView>,
}

impl SettingsView {
    pub fn new(
        navigation: Entity<NavigationState>,
        secrets_state: Entity<SecretsState>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let secrets_list = cx.new(|cx| SecretsListView::new(secrets_state, window, cx));

        Self {
            navigation,
            secrets_list,
        }
    }

    fn on_exit(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        self.navigation.update(cx, |navigation, cx| {
            exit(navigation);
            cx.notify();
        });
    }

    fn render_header(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let muted = cx.theme().muted_foreground;
        let hover = cx.theme().foreground;

        h_flex()
            .items_center()
            .p_4()
            .border_b_1()
            .border_color(cx.theme().border)
            .child(
                div()
                    .id(EXIT_CONTROL_ID)
                    .debug_selector(|| EXIT_CONTROL_ID.to_string())
                    .flex()
                    .items_center()
                    .text_color(muted)
                    .cursor_pointer()
                    .hover(move |s| s.text_color(hover))
                    .on_click(cx.listener(Self::on_exit))
                    .child(ArrowLeftIcon::new().size_5().mr_2())
                    .child(i18n_settings(cx, "exit")),
            )
    }
}

impl Render for SettingsView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .bg(cx.theme().background)
            .child(
                v_flex()
                    .size_full()
                    .max_w(px(CONTENT_MAX_WIDTH))
                    .mx_auto()
                    .child(self.render_header(cx))
                    .child(
                        div()
                            .id(MAIN_CONTENT_SELECTOR)
                            .debug_selector(|| MAIN_CONTENT_SELECTOR.to_string())
                            .flex_1()
                            .p_6()
                            .overflow_y_scroll()
                            .child(self.secrets_list.clone()),
                    ),
            )
    }
}
