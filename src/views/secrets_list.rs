//! Secrets List View
//!
//! Lists known and stored secrets with their source, lets the user reveal,
//! delete, and add or replace values.

use crate::helpers::mask_secret;
use crate::secrets::{SecretEntry, SecretSource, SecretStore, validate_key};
use crate::states::{AppStore, SecretsLoadState, SecretsState, i18n_format, i18n_secrets};
use gpui::{App, Context, Entity, FontWeight, Subscription, Window, div, prelude::*};
use gpui_component::{
    ActiveTheme, Icon, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
    label::Label,
    v_flex,
};
use std::sync::Arc;
use tracing::{error, info};

/// Secrets list component
pub struct SecretsListView {
    /// Secrets state entity
    secrets_state: Entity<SecretsState>,
    /// Key name input
    key_input: Entity<InputState>,
    /// Secret value input
    value_input: Entity<InputState>,
    /// Subscriptions
    _subscriptions: Vec<Subscription>,
}

impl SecretsListView {
    pub fn new(
        secrets_state: Entity<SecretsState>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let mut subscriptions = Vec::new();

        subscriptions.push(cx.observe(&secrets_state, |_this, _model, cx| {
            cx.notify();
        }));

        let key_input = cx.new(|cx| {
            InputState::new(window, cx).placeholder(i18n_secrets(cx, "key_placeholder"))
        });
        let value_input = cx.new(|cx| {
            InputState::new(window, cx)
                .masked(true)
                .placeholder(i18n_secrets(cx, "value_placeholder"))
        });

        subscriptions.push(cx.subscribe_in(
            &value_input,
            window,
            |this, _state, event: &InputEvent, window, cx| {
                if matches!(event, InputEvent::PressEnter { .. }) {
                    this.save(window, cx);
                }
            },
        ));

        let this = Self {
            secrets_state,
            key_input,
            value_input,
            _subscriptions: subscriptions,
        };
        this.reload(cx);
        this
    }

    /// The opened store, or `None` after showing why it is unavailable
    fn secret_store(&self, cx: &mut Context<Self>) -> Option<Arc<SecretStore>> {
        match cx.global::<AppStore>().secrets() {
            Ok(secret_store) => Some(secret_store),
            Err(message) => {
                self.secrets_state
                    .update(cx, |state, cx| state.set_notice(Some(message), cx));
                None
            }
        }
    }

    /// Refresh entries from the store in the background
    fn reload(&self, cx: &mut Context<Self>) {
        let store = cx.global::<AppStore>().clone();
        let (known_keys, strategy) = {
            let state = store.read(cx);
            (state.known_keys().to_vec(), state.key_strategy())
        };

        let secret_store = match store.secrets() {
            Ok(secret_store) => secret_store,
            Err(message) => {
                self.secrets_state
                    .update(cx, |state, cx| state.set_error(message, cx));
                return;
            }
        };

        self.secrets_state.update(cx, |state, cx| state.set_loading(cx));

        let secrets_state = self.secrets_state.clone();
        cx.spawn(async move |_, cx| {
            let result = cx
                .background_executor()
                .spawn(async move { secret_store.snapshot(&known_keys, strategy) })
                .await;

            match result {
                Ok(entries) => {
                    let _ = secrets_state.update(cx, |state, cx| state.set_entries(entries, cx));
                }
                Err(e) => {
                    error!(error = %e, "Failed to load secrets");
                    let _ = secrets_state.update(cx, |state, cx| state.set_error(e.to_string(), cx));
                }
            }
        })
        .detach();
    }

    /// Save the form contents, then reload
    fn save(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let key = self.key_input.read(cx).value().trim().to_string();
        let value = self.value_input.read(cx).value().to_string();

        if let Err(e) = validate_key(&key) {
            let reason = e.to_string();
            let notice: Arc<str> =
                i18n_format(cx, "secrets.key_invalid", &[("reason", reason.as_str())])
                    .to_string()
                    .into();
            self.secrets_state
                .update(cx, |state, cx| state.set_notice(Some(notice), cx));
            return;
        }
        if value.is_empty() {
            let notice: Arc<str> = i18n_secrets(cx, "value_required").to_string().into();
            self.secrets_state
                .update(cx, |state, cx| state.set_notice(Some(notice), cx));
            return;
        }

        let Some(secret_store) = self.secret_store(cx) else {
            return;
        };
        self.secrets_state
            .update(cx, |state, cx| state.set_notice(None, cx));

        let secrets_state = self.secrets_state.clone();
        cx.spawn_in(window, async move |this, cx| {
            let saved_key = key.clone();
            let result = cx
                .background_executor()
                .spawn(async move { secret_store.set(&key, &value).await })
                .await;

            match result {
                Ok(()) => {
                    info!(key = %saved_key, "Secret updated from settings");
                    // Inputs keep their text until the write succeeds
                    let _ = this.update_in(cx, |this, window, cx| {
                        this.key_input
                            .update(cx, |input, cx| input.set_value("", window, cx));
                        this.value_input
                            .update(cx, |input, cx| input.set_value("", window, cx));
                        this.reload(cx);
                    });
                }
                Err(e) => {
                    error!(key = %saved_key, error = %e, "Failed to save secret");
                    let notice: Arc<str> = e.to_string().into();
                    let _ = secrets_state.update(cx, |state, cx| state.set_notice(Some(notice), cx));
                }
            }
        })
        .detach();
    }

    /// Delete a stored secret, then reload
    fn delete(&mut self, key: String, cx: &mut Context<Self>) {
        let Some(secret_store) = self.secret_store(cx) else {
            return;
        };
        let secrets_state = self.secrets_state.clone();

        cx.spawn(async move |this, cx| {
            let deleted_key = key.clone();
            let result = cx
                .background_executor()
                .spawn(async move { secret_store.delete(&key).await })
                .await;

            match result {
                Ok(()) => {
                    let _ = this.update(cx, |this, cx| this.reload(cx));
                }
                Err(e) => {
                    error!(key = %deleted_key, error = %e, "Failed to delete secret");
                    let notice: Arc<str> = e.to_string().into();
                    let _ = secrets_state.update(cx, |state, cx| state.set_notice(Some(notice), cx));
                }
            }
        })
        .detach();
    }

    /// Render source badge with color
    fn render_source_badge(&self, source: SecretSource, cx: &App) -> impl IntoElement {
        let color = match source {
            SecretSource::Stored => cx.theme().success,
            SecretSource::Environment => cx.theme().info,
            SecretSource::Both => cx.theme().warning,
            SecretSource::Missing => cx.theme().muted_foreground,
        };

        div()
            .px_1()
            .py_px()
            .rounded_sm()
            .bg(color.opacity(0.2))
            .child(
                Label::new(i18n_secrets(cx, source.label_key()))
                    .text_xs()
                    .text_color(color),
            )
    }

    /// Render a single secret row
    fn render_row(
        &self,
        index: usize,
        entry: &SecretEntry,
        revealed: bool,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let value_text = match &entry.value {
            Some(value) if revealed => value.clone(),
            Some(value) => mask_secret(value),
            None => i18n_secrets(cx, "not_set").to_string(),
        };
        let value_color = if entry.value.is_some() {
            cx.theme().foreground
        } else {
            cx.theme().muted_foreground
        };

        let reveal_key = entry.key.clone();
        let delete_key = entry.key.clone();

        h_flex()
            .id(("secret-row", index))
            .w_full()
            .px_3()
            .py_2()
            .gap_3()
            .items_center()
            .border_b_1()
            .border_color(cx.theme().border)
            .child(
                v_flex()
                    .flex_1()
                    .gap_1()
                    .child(
                        h_flex()
                            .gap_2()
                            .items_center()
                            .child(
                                Label::new(entry.key.clone())
                                    .text_sm()
                                    .font_weight(FontWeight::SEMIBOLD),
                            )
                            .child(self.render_source_badge(entry.source, cx)),
                    )
                    .child(
                        Label::new(value_text)
                            .text_xs()
                            .text_color(value_color)
                            .text_ellipsis(),
                    ),
            )
            .when(entry.value.is_some(), |this| {
                this.child(
                    Button::new(("reveal-secret", index))
                        .ghost()
                        .small()
                        .icon(if revealed { IconName::EyeOff } else { IconName::Eye })
                        .tooltip(i18n_secrets(cx, if revealed { "hide" } else { "reveal" }))
                        .on_click(cx.listener(move |this, _, _, cx| {
                            let key = reveal_key.clone();
                            this.secrets_state
                                .update(cx, |state, cx| state.toggle_reveal(&key, cx));
                        })),
                )
            })
            .when(entry.source.is_stored(), |this| {
                this.child(
                    Button::new(("delete-secret", index))
                        .ghost()
                        .small()
                        .icon(IconName::Delete)
                        .tooltip(i18n_secrets(cx, "delete"))
                        .on_click(cx.listener(move |this, _, _, cx| {
                            this.delete(delete_key.clone(), cx);
                        })),
                )
            })
    }

    /// Render the add/replace form
    fn render_form(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let notice = self
            .secrets_state
            .read(cx)
            .notice()
            .map(|n| n.to_string());

        v_flex()
            .gap_2()
            .p_3()
            .rounded_md()
            .border_1()
            .border_color(cx.theme().border)
            .child(
                Label::new(i18n_secrets(cx, "add_title"))
                    .text_sm()
                    .font_weight(FontWeight::SEMIBOLD),
            )
            .child(
                h_flex()
                    .gap_2()
                    .child(div().flex_1().child(Input::new(&self.key_input)))
                    .child(div().flex_1().child(Input::new(&self.value_input)))
                    .child(
                        Button::new("save-secret")
                            .primary()
                            .label(i18n_secrets(cx, "save"))
                            .on_click(cx.listener(|this, _, window, cx| this.save(window, cx))),
                    ),
            )
            .when_some(notice, |this, notice| {
                this.child(
                    Label::new(notice)
                        .text_xs()
                        .text_color(cx.theme().danger),
                )
            })
    }

    /// Render the list body for the current load state
    fn render_entries(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.secrets_state.read(cx);
        let load_state = state.load_state().clone();

        // Collect row data before mutable borrow
        let rows: Vec<_> = state
            .entries()
            .iter()
            .map(|entry| (entry.clone(), state.is_revealed(&entry.key)))
            .collect();

        let body = match load_state {
            SecretsLoadState::Idle | SecretsLoadState::Loading if rows.is_empty() => h_flex()
                .p_4()
                .gap_2()
                .justify_center()
                .child(Icon::new(IconName::Loader).size_4())
                .child(
                    Label::new(i18n_secrets(cx, "loading"))
                        .text_sm()
                        .text_color(cx.theme().muted_foreground),
                )
                .into_any_element(),
            SecretsLoadState::Error(message) => h_flex()
                .p_4()
                .gap_2()
                .child(
                    Icon::new(IconName::CircleX)
                        .size_4()
                        .text_color(cx.theme().danger),
                )
                .child(
                    Label::new(message.to_string())
                        .text_sm()
                        .text_color(cx.theme().danger),
                )
                .into_any_element(),
            _ if rows.is_empty() => div()
                .p_4()
                .child(
                    Label::new(i18n_secrets(cx, "empty"))
                        .text_sm()
                        .text_color(cx.theme().muted_foreground),
                )
                .into_any_element(),
            _ => {
                let mut items = Vec::with_capacity(rows.len());
                for (index, (entry, revealed)) in rows.iter().enumerate() {
                    items.push(self.render_row(index, entry, *revealed, cx).into_any_element());
                }
                v_flex().children(items).into_any_element()
            }
        };

        div()
            .w_full()
            .rounded_md()
            .border_1()
            .border_color(cx.theme().border)
            .overflow_hidden()
            .child(body)
    }
}

impl Render for SecretsListView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let stored = self.secrets_state.read(cx).stored_count().to_string();

        v_flex()
            .w_full()
            .gap_4()
            .child(
                v_flex()
                    .gap_1()
                    .child(
                        h_flex()
                            .gap_2()
                            .items_center()
                            .child(
                                Label::new(i18n_secrets(cx, "title"))
                                    .text_lg()
                                    .font_weight(FontWeight::SEMIBOLD),
                            )
                            .child(
                                Label::new(i18n_format(
                                    cx,
                                    "secrets.count",
                                    &[("count", stored.as_str())],
                                ))
                                .text_xs()
                                .text_color(cx.theme().muted_foreground),
                            ),
                    )
                    .child(
                        Label::new(i18n_secrets(cx, "description"))
                            .text_sm()
                            .text_color(cx.theme().muted_foreground),
                    ),
            )
            .child(self.render_entries(cx))
            .child(self.render_form(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::Cipher;
    use crate::states::AppState;
    use gpui::{TestAppContext, VisualTestContext};
    use std::path::PathBuf;

    fn mount(
        cx: &mut TestAppContext,
        secrets_path: PathBuf,
    ) -> (Entity<SecretsListView>, AppStore, &mut VisualTestContext) {
        let secret_store = SecretStore::at(secrets_path, Cipher::from_key(&[6u8; 32]))
            .with_env_lookup(|_| None);
        let store = cx.update(|cx| {
            gpui_component::init(cx);
            let store = AppStore::init(AppState::new(), Ok(Arc::new(secret_store)), cx);
            cx.set_global(store.clone());
            store
        });

        let secrets_state = store.secrets_state();
        let (view, cx) = cx.add_window_view(move |window, cx| {
            SecretsListView::new(secrets_state, window, cx)
        });
        cx.run_until_parked();
        (view, store, cx)
    }

    fn fill_and_save(view: &Entity<SecretsListView>, cx: &mut VisualTestContext) {
        cx.update(|window, cx| {
            view.update(cx, |view, cx| {
                view.key_input
                    .update(cx, |input, cx| input.set_value("GITHUB_TOKEN", window, cx));
                view.value_input
                    .update(cx, |input, cx| input.set_value("ghp-secret-value", window, cx));
                view.save(window, cx);
            });
        });
        cx.run_until_parked();
    }

    fn form_values(
        view: &Entity<SecretsListView>,
        cx: &mut VisualTestContext,
    ) -> (String, String) {
        cx.update(|_, cx| {
            let view = view.read(cx);
            (
                view.key_input.read(cx).value().to_string(),
                view.value_input.read(cx).value().to_string(),
            )
        })
    }

    #[gpui::test]
    fn successful_save_clears_form(cx: &mut TestAppContext) {
        let dir = tempfile::tempdir().expect("tempdir");
        let (view, store, cx) = mount(cx, dir.path().join("secrets.toml"));

        fill_and_save(&view, cx);

        assert_eq!(form_values(&view, cx), (String::new(), String::new()));
        cx.update(|_, cx| {
            let state = store.secrets_state();
            let state = state.read(cx);
            assert!(state.notice().is_none());
            assert!(state.entries().iter().any(|e| e.key == "GITHUB_TOKEN"));
        });
    }

    #[gpui::test]
    fn failed_save_keeps_typed_values(cx: &mut TestAppContext) {
        let dir = tempfile::tempdir().expect("tempdir");
        // A regular file where the store expects its directory
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").expect("write");
        let (view, store, cx) = mount(cx, blocker.join("secrets.toml"));

        fill_and_save(&view, cx);

        assert_eq!(
            form_values(&view, cx),
            ("GITHUB_TOKEN".to_string(), "ghp-secret-value".to_string())
        );
        cx.update(|_, cx| {
            assert!(store.secrets_state().read(cx).notice().is_some());
        });
    }
}
