//! Application - App Initialization and Window Management
//!
//! Main entry point for the GPUI application.

use gpui::{App, AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use gpui_component::{Root, Theme, ThemeMode, TitleBar};
use std::sync::Arc;
use tracing::{error, info};

use crate::app::navigation::Route;
use crate::app::workspace::Workspace;
use crate::assets::Assets;
use crate::helpers::{MenuAction, NavAction, new_key_bindings};
use crate::secrets::SecretStore;
use crate::states::{AppState, AppStore, LocaleAction, ThemeAction, update_app_state_and_save};

/// Apply a persisted theme choice; `None` follows the system appearance
fn apply_theme(theme: Option<ThemeMode>, cx: &mut App) {
    match theme {
        Some(mode) => Theme::change(mode, None, cx),
        None => Theme::sync_system_appearance(None, cx),
    }
}

fn handle_nav_action(action: &NavAction, cx: &mut App) {
    let navigation = cx.global::<AppStore>().navigation();
    navigation.update(cx, |navigation, cx| {
        let changed = match action {
            NavAction::Home => navigation.navigate(Route::Home),
            NavAction::Settings => navigation.navigate(Route::Settings),
            NavAction::Back => navigation.back(),
        };
        if changed {
            cx.notify();
        }
    });
}

fn handle_theme_action(action: &ThemeAction, cx: &mut App) {
    let theme = match action {
        ThemeAction::Light => Some(ThemeMode::Light),
        ThemeAction::Dark => Some(ThemeMode::Dark),
        ThemeAction::System => None,
    };
    apply_theme(theme, cx);
    update_app_state_and_save(cx, "set_theme", move |state, _| state.set_theme(theme));
}

fn handle_locale_action(action: &LocaleAction, cx: &mut App) {
    let locale = match action {
        LocaleAction::En => "en",
        LocaleAction::Zh => "zh",
    };
    update_app_state_and_save(cx, "set_locale", move |state, _| {
        state.set_locale(locale.to_string());
    });
}

/// Run the secrets application
pub fn run_app() {
    let app_state = AppState::try_load().unwrap_or_else(|e| {
        error!(error = %e, "Failed to load app state, using defaults");
        AppState::new()
    });

    // The window still opens without a store; the secrets list shows why
    let secret_store = SecretStore::open_default().map(Arc::new).map_err(|e| {
        error!(error = %e, "Failed to open secret store");
        Arc::<str>::from(e.to_string())
    });

    Application::new().with_assets(Assets).run(move |cx: &mut App| {
        gpui_component::init(cx);
        apply_theme(app_state.theme(), cx);

        cx.bind_keys(new_key_bindings());
        cx.on_action(|_: &MenuAction, cx: &mut App| cx.quit());
        cx.on_action(handle_nav_action);
        cx.on_action(handle_theme_action);
        cx.on_action(handle_locale_action);

        // Quit the app when all windows are closed
        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();

        let bounds = app_state
            .bounds()
            .cloned()
            .unwrap_or_else(|| Bounds::centered(None, size(px(960.0), px(720.0)), cx));

        let store = AppStore::init(app_state, secret_store, cx);
        cx.set_global(store);

        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitleBar::title_bar_options()),
            app_id: Some("secrets-gui".to_string()),
            ..Default::default()
        };

        let opened = cx.open_window(window_options, |window, cx| {
            let workspace = cx.new(|cx| Workspace::new(window, cx));
            cx.new(|cx| Root::new(workspace, window, cx))
        });

        if let Err(e) = opened {
            error!(error = %e, "Failed to open main window");
            cx.quit();
            return;
        }

        info!("Main window opened");
        cx.activate(true);
    });
}
