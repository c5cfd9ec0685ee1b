//! Application State
//!
//! Global application state: locale, theme, window bounds, and how secrets
//! are resolved. Persisted as TOML in the config directory.

use crate::app::navigation::NavigationState;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;
use crate::secrets::{KeyRetrievalStrategy, SecretStore};
use crate::states::SecretsState;
use gpui::{Action, App, AppContext, Bounds, Context, Entity, Global, Pixels};
use gpui_component::ThemeMode;
use locale_config::Locale;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

// ==================== Actions ====================

/// Theme selection action
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, JsonSchema, Action)]
pub enum ThemeAction {
    Light,
    Dark,
    System,
}

/// Locale selection action
#[derive(Clone, Copy, PartialEq, Debug, Deserialize, JsonSchema, Action)]
pub enum LocaleAction {
    En,
    Zh,
}

// ==================== Persisted State ====================

const LIGHT_THEME_MODE: &str = "light";
const DARK_THEME_MODE: &str = "dark";
const CONFIG_FILE: &str = "secrets-gui.toml";

/// Keys listed even before anything is stored
fn default_known_keys() -> Vec<String> {
    ["OPENAI_API_KEY", "ANTHROPIC_API_KEY", "GOOGLE_API_KEY"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn get_config_path() -> Result<PathBuf> {
    let config_dir = get_or_create_config_dir()?;
    let path = config_dir.join(CONFIG_FILE);
    if !path.exists() {
        std::fs::write(&path, "")?;
    }
    Ok(path)
}

/// Persisted application state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    locale: Option<String>,
    bounds: Option<Bounds<Pixels>>,
    theme: Option<String>,
    #[serde(default)]
    key_strategy: KeyRetrievalStrategy,
    #[serde(default = "default_known_keys")]
    known_keys: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            locale: None,
            bounds: None,
            theme: None,
            key_strategy: KeyRetrievalStrategy::default(),
            known_keys: default_known_keys(),
        }
    }
}

impl AppState {
    /// Load state from config file
    pub fn try_load() -> Result<Self> {
        let path = get_config_path()?;
        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(&path)?;

        let mut state = Self::parse(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })?;

        // Detect system locale if not set
        if state.locale.as_ref().is_none_or(|l| l.is_empty()) {
            if let Some((lang, _)) = Locale::current().to_string().split_once('-') {
                state.locale = Some(lang.to_string());
            }
        }

        Ok(state)
    }

    /// Parse persisted TOML; blank input yields defaults
    pub fn parse(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(toml::from_str(value)?)
    }

    /// Create new default state
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Getters ====================

    pub fn bounds(&self) -> Option<&Bounds<Pixels>> {
        self.bounds.as_ref()
    }

    pub fn theme(&self) -> Option<ThemeMode> {
        match self.theme.as_deref() {
            Some(LIGHT_THEME_MODE) => Some(ThemeMode::Light),
            Some(DARK_THEME_MODE) => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Current locale; only `en` and `zh` have translations
    pub fn locale(&self) -> &str {
        match self.locale.as_deref() {
            Some("zh") => "zh",
            _ => "en",
        }
    }

    pub fn key_strategy(&self) -> KeyRetrievalStrategy {
        self.key_strategy
    }

    pub fn known_keys(&self) -> &[String] {
        &self.known_keys
    }

    // ==================== Setters ====================

    pub fn set_bounds(&mut self, bounds: Bounds<Pixels>) {
        self.bounds = Some(bounds);
    }

    pub fn set_theme(&mut self, theme: Option<ThemeMode>) {
        self.theme = match theme {
            Some(ThemeMode::Light) => Some(LIGHT_THEME_MODE.to_string()),
            Some(ThemeMode::Dark) => Some(DARK_THEME_MODE.to_string()),
            _ => None,
        };
    }

    pub fn set_locale(&mut self, locale: String) {
        self.locale = Some(locale);
    }
}

// ==================== Global Store ====================

/// The opened secret store, or why it could not be opened
pub type SecretStoreHandle = std::result::Result<Arc<SecretStore>, Arc<str>>;

/// Global store accessible via `cx.global::<AppStore>()`
#[derive(Clone)]
pub struct AppStore {
    app_state: Entity<AppState>,
    navigation: Entity<NavigationState>,
    secrets_state: Entity<SecretsState>,
    secret_store: SecretStoreHandle,
}

impl AppStore {
    /// Create a new global store
    pub fn new(
        app_state: Entity<AppState>,
        navigation: Entity<NavigationState>,
        secrets_state: Entity<SecretsState>,
        secret_store: SecretStoreHandle,
    ) -> Self {
        Self {
            app_state,
            navigation,
            secrets_state,
            secret_store,
        }
    }

    /// Build all entities from loaded state.
    ///
    /// A store that failed to open starts the secrets list in its error state.
    pub fn init(app_state: AppState, secret_store: SecretStoreHandle, cx: &mut App) -> Self {
        let secrets_state = match &secret_store {
            Ok(_) => SecretsState::default(),
            Err(message) => SecretsState::failed(message.clone()),
        };

        Self::new(
            cx.new(|_| app_state),
            cx.new(|_| NavigationState::default()),
            cx.new(|_| secrets_state),
            secret_store,
        )
    }

    /// Get the navigation entity
    pub fn navigation(&self) -> Entity<NavigationState> {
        self.navigation.clone()
    }

    /// Get the secrets list state entity
    pub fn secrets_state(&self) -> Entity<SecretsState> {
        self.secrets_state.clone()
    }

    /// Get the encrypted secret store
    pub fn secrets(&self) -> SecretStoreHandle {
        self.secret_store.clone()
    }

    /// Read app state
    pub fn read<'a>(&self, cx: &'a App) -> &'a AppState {
        self.app_state.read(cx)
    }

    /// Update app state
    pub fn update<R, C: AppContext>(
        &self,
        cx: &mut C,
        update: impl FnOnce(&mut AppState, &mut Context<AppState>) -> R,
    ) -> C::Result<R> {
        self.app_state.update(cx, update)
    }
}

impl Global for AppStore {}

// ==================== Persistence ====================

/// Save app state to disk
pub fn save_app_state(state: &AppState) -> Result<()> {
    let path = get_config_path()?;
    let value = toml::to_string(state)?;
    std::fs::write(path, value)?;
    Ok(())
}

/// Update app state and save to disk asynchronously
pub fn update_app_state_and_save<F>(cx: &App, action_name: &'static str, mutation: F)
where
    F: FnOnce(&mut AppState, &App) + Send + 'static,
{
    let store = cx.global::<AppStore>().clone();

    cx.spawn(async move |cx| {
        let current_state = store.update(cx, |state, cx| {
            mutation(state, cx);
            state.clone()
        });

        if let Ok(state) = current_state {
            cx.background_executor()
                .spawn(async move {
                    if let Err(e) = save_app_state(&state) {
                        error!(error = %e, action = action_name, "Failed to save state");
                    } else {
                        info!(action = action_name, "State saved successfully");
                    }
                })
                .await;
        }

        cx.update(|cx| cx.refresh_windows()).ok();
    })
    .detach();
}
