//! Workspace - Main Shell
//!
//! Holds the title bar and renders the view for the current route. The
//! settings view is mounted when its route becomes current and dropped when
//! the user leaves it.

use gpui::{Context, Entity, Subscription, Window, div, prelude::*};
use gpui_component::{ActiveTheme, TitleBar, h_flex, label::Label, v_flex};

use crate::app::navigation::{NavigationState, Route};
use crate::states::{AppStore, SecretsState, i18n_common, update_app_state_and_save};
use crate::views::{HomeView, SettingsView};
use rust_i18n::t;

/// Main workspace containing the application layout
pub struct Workspace {
    navigation: Entity<NavigationState>,
    secrets_state: Entity<SecretsState>,
    home: Entity<HomeView>,
    settings: Option<Entity<SettingsView>>,
    _subscriptions: Vec<Subscription>,
}

impl Workspace {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let store = cx.global::<AppStore>().clone();
        let navigation = store.navigation();
        let secrets_state = store.secrets_state();
        let home = cx.new(HomeView::new);

        let subscriptions = vec![
            cx.observe(&navigation, |this, navigation, cx| {
                if navigation.read(cx).route() != Route::Settings {
                    this.settings = None;
                }
                cx.notify();
            }),
            cx.observe_window_bounds(window, |_this, window, cx| {
                let bounds = window.bounds();
                update_app_state_and_save(cx, "save_bounds", move |state, _| {
                    state.set_bounds(bounds);
                });
            }),
        ];

        Self {
            navigation,
            secrets_state,
            home,
            settings: None,
            _subscriptions: subscriptions,
        }
    }

    /// Get or mount the settings view
    fn settings_view(&mut self, window: &mut Window, cx: &mut Context<Self>) -> Entity<SettingsView> {
        if let Some(view) = &self.settings {
            return view.clone();
        }

        let navigation = self.navigation.clone();
        let secrets_state = self.secrets_state.clone();
        let view = cx.new(|cx| SettingsView::new(navigation, secrets_state, window, cx));
        self.settings = Some(view.clone());
        view
    }

    fn render_title_bar(&self, route: Route, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = cx.global::<AppStore>().read(cx).locale().to_string();
        let page_title = t!(route.title_key(), locale = &locale).to_string();

        TitleBar::new().child(
            h_flex()
                .flex_1()
                .items_center()
                .gap_2()
                .pl_4()
                .child(Label::new(i18n_common(cx, "app_title")).text_sm())
                .child(
                    Label::new(page_title)
                        .text_sm()
                        .text_color(cx.theme().muted_foreground),
                ),
        )
    }
}

impl Render for Workspace {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let route = self.navigation.read(cx).route();
        let content = match route {
            Route::Home => self.home.clone().into_any_element(),
            Route::Settings => self.settings_view(window, cx).into_any_element(),
        };

        v_flex()
            .size_full()
            .bg(cx.theme().background)
            .child(self.render_title_bar(route, cx))
            .child(div().flex_1().overflow_hidden().child(content))
    }
}
