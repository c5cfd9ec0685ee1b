//! Secrets State
//!
//! Entries shown by the secrets list, their loading status, which values
//! are revealed, and the last save/delete failure.

use crate::secrets::SecretEntry;
use gpui::Context;
use std::collections::HashSet;
use std::sync::Arc;

/// Secrets loading state
#[derive(Debug, Clone, Default)]
pub enum SecretsLoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Snapshot in flight
    Loading,
    /// Entries are current
    Loaded,
    /// Snapshot failed
    Error(Arc<str>),
}

/// State behind the secrets list
#[derive(Default)]
pub struct SecretsState {
    entries: Vec<SecretEntry>,
    load_state: SecretsLoadState,
    revealed: HashSet<String>,
    notice: Option<Arc<str>>,
}

impl SecretsState {
    /// State for a list whose store could not be opened
    pub fn failed(message: impl Into<Arc<str>>) -> Self {
        Self {
            load_state: SecretsLoadState::Error(message.into()),
            ..Self::default()
        }
    }

    // ==================== Getters ====================

    pub fn entries(&self) -> &[SecretEntry] {
        &self.entries
    }

    pub fn load_state(&self) -> &SecretsLoadState {
        &self.load_state
    }

    /// Number of entries with a value in the store
    pub fn stored_count(&self) -> usize {
        self.entries.iter().filter(|e| e.source.is_stored()).count()
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.revealed.contains(key)
    }

    /// Last save/delete failure, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    // ==================== Setters ====================

    fn apply_entries(&mut self, entries: Vec<SecretEntry>) {
        // Forget reveal flags for keys that no longer have a value
        self.revealed.retain(|key| {
            entries
                .iter()
                .any(|e| &e.key == key && e.value.is_some())
        });
        self.entries = entries;
        self.load_state = SecretsLoadState::Loaded;
    }

    fn apply_toggle_reveal(&mut self, key: &str) {
        if !self.revealed.remove(key) {
            self.revealed.insert(key.to_string());
        }
    }

    /// Replace entries after a successful snapshot
    pub fn set_entries(&mut self, entries: Vec<SecretEntry>, cx: &mut Context<Self>) {
        self.apply_entries(entries);
        cx.notify();
    }

    /// Set loading state
    pub fn set_loading(&mut self, cx: &mut Context<Self>) {
        self.load_state = SecretsLoadState::Loading;
        cx.notify();
    }

    /// Set error state
    pub fn set_error(&mut self, message: impl Into<Arc<str>>, cx: &mut Context<Self>) {
        self.load_state = SecretsLoadState::Error(message.into());
        cx.notify();
    }

    /// Show or hide the plaintext value of `key`
    pub fn toggle_reveal(&mut self, key: &str, cx: &mut Context<Self>) {
        self.apply_toggle_reveal(key);
        cx.notify();
    }

    /// Set or clear the save/delete failure message
    pub fn set_notice(&mut self, notice: Option<Arc<str>>, cx: &mut Context<Self>) {
        self.notice = notice;
        cx.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::SecretSource;

    fn entry(key: &str, source: SecretSource, value: Option<&str>) -> SecretEntry {
        SecretEntry {
            key: key.to_string(),
            source,
            value: value.map(String::from),
            updated_at: None,
        }
    }

    #[test]
    fn apply_entries_marks_loaded() {
        let mut state = SecretsState::default();
        assert!(matches!(state.load_state(), SecretsLoadState::Idle));

        state.apply_entries(vec![
            entry("A", SecretSource::Stored, Some("a")),
            entry("B", SecretSource::Environment, Some("b")),
            entry("C", SecretSource::Both, Some("c")),
            entry("D", SecretSource::Missing, None),
        ]);

        assert!(matches!(state.load_state(), SecretsLoadState::Loaded));
        assert_eq!(state.entries().len(), 4);
        assert_eq!(state.stored_count(), 2);
        assert_eq!(state.entries()[1].source, SecretSource::Environment);
    }

    #[test]
    fn toggle_reveal_flips() {
        let mut state = SecretsState::default();
        state.apply_toggle_reveal("A");
        assert!(state.is_revealed("A"));
        state.apply_toggle_reveal("A");
        assert!(!state.is_revealed("A"));
    }

    #[test]
    fn reload_drops_reveal_for_removed_keys() {
        let mut state = SecretsState::default();
        state.apply_entries(vec![
            entry("A", SecretSource::Stored, Some("a")),
            entry("B", SecretSource::Stored, Some("b")),
        ]);
        state.apply_toggle_reveal("A");
        state.apply_toggle_reveal("B");

        state.apply_entries(vec![
            entry("A", SecretSource::Stored, Some("a")),
            entry("B", SecretSource::Missing, None),
        ]);

        assert!(state.is_revealed("A"));
        assert!(!state.is_revealed("B"));
    }
}
