//! Secret Store
//!
//! Encrypted persistence for named secrets, with environment variables as a
//! second source.

use crate::error::{Error, Result};
use crate::helpers::{
    Cipher, get_or_create_config_dir, get_or_create_data_dir, replace_private_file,
};
use crate::secrets::{KeyRetrievalStrategy, SecretEntry, SecretSource, StoredSecret, validate_key};
use serde::{Deserialize, Serialize};
use smol::lock::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Secrets file name inside the config directory
const SECRETS_FILE: &str = "secrets.toml";
/// Key file name inside the data directory
const KEY_FILE: &str = "master.key";

/// Environment lookup used to resolve secrets outside the store
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// TOML wrapper structure for the secrets list
#[derive(Debug, Default, Deserialize, Serialize)]
struct SecretsFile {
    #[serde(default)]
    secrets: Vec<StoredSecret>,
}

/// Encrypted secrets file plus environment fallback
#[derive(Clone)]
pub struct SecretStore {
    path: PathBuf,
    cipher: Cipher,
    env: EnvLookup,
    /// Serializes read-modify-write cycles on the file
    write_lock: Arc<Mutex<()>>,
}

impl SecretStore {
    /// Open the store in the platform config directory, creating the
    /// encryption key on first use.
    pub fn open_default() -> Result<Self> {
        let config_dir = get_or_create_config_dir()?;
        let data_dir = get_or_create_data_dir()?;
        let cipher = Cipher::load_or_create(&data_dir.join(KEY_FILE))?;
        let path = config_dir.join(SECRETS_FILE);

        #[cfg(debug_assertions)]
        info!("Secrets file: {}", path.display());

        Ok(Self::at(path, cipher))
    }

    /// Store backed by `path`, reading the real process environment
    pub fn at(path: impl Into<PathBuf>, cipher: Cipher) -> Self {
        Self {
            path: path.into(),
            cipher,
            env: Arc::new(|key| std::env::var(key).ok()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Replace the environment lookup
    pub fn with_env_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env = Arc::new(lookup);
        self
    }

    /// Path of the secrets file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<SecretsFile> {
        if !self.path.exists() {
            return Ok(SecretsFile::default());
        }

        let value = std::fs::read_to_string(&self.path)?;
        if value.trim().is_empty() {
            return Ok(SecretsFile::default());
        }

        Ok(toml::from_str(&value)?)
    }

    /// Callers run on a background executor and hold `write_lock`
    fn write_file(&self, file: &SecretsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(file)?;
        replace_private_file(&self.path, content.as_bytes())
    }

    /// Value of `key` in the process environment, if set and non-empty
    pub fn env_value(&self, key: &str) -> Option<String> {
        (self.env)(key).filter(|v| !v.is_empty())
    }

    /// Decrypted value of `key` in the store
    pub fn stored_value(&self, key: &str) -> Result<Option<String>> {
        let file = self.read_file()?;
        file.secrets
            .iter()
            .find(|s| s.key == key)
            .map(|s| self.cipher.decrypt(&s.value))
            .transpose()
    }

    /// All stored secrets, decrypted and sorted by key.
    ///
    /// Entries that fail to decrypt are skipped with a warning.
    pub fn list(&self) -> Result<Vec<SecretEntry>> {
        let file = self.read_file()?;

        let mut entries: Vec<SecretEntry> = file
            .secrets
            .into_iter()
            .filter_map(|stored| match self.cipher.decrypt(&stored.value) {
                Ok(value) => Some(SecretEntry {
                    key: stored.key,
                    source: SecretSource::Stored,
                    value: Some(value),
                    updated_at: stored.updated_at,
                }),
                Err(e) => {
                    warn!(key = %stored.key, error = %e, "Skipping unreadable secret");
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    /// Resolve `key` using `strategy`
    pub fn get(&self, key: &str, strategy: KeyRetrievalStrategy) -> Result<String> {
        let value = match strategy {
            KeyRetrievalStrategy::EnvironmentOnly => self.env_value(key),
            KeyRetrievalStrategy::StoreOnly => self.stored_value(key)?,
            KeyRetrievalStrategy::Both => match self.env_value(key) {
                Some(value) => Some(value),
                None => self.stored_value(key)?,
            },
        };

        value.ok_or_else(|| Error::NotFound {
            key: key.to_string(),
        })
    }

    /// Encrypt and save `value` under `key`, replacing any previous value
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        if value.is_empty() {
            return Err(Error::Invalid {
                message: format!("Secret value for {key} must not be empty"),
            });
        }

        let _guard = self.write_lock.lock().await;
        let mut file = self.read_file()?;
        let secret = StoredSecret {
            key: key.to_string(),
            value: self.cipher.encrypt(value)?,
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        match file.secrets.iter_mut().find(|s| s.key == key) {
            Some(existing) => *existing = secret,
            None => file.secrets.push(secret),
        }
        file.secrets.sort_by(|a, b| a.key.cmp(&b.key));

        self.write_file(&file)?;
        info!(key, "Secret saved");
        Ok(())
    }

    /// Remove `key` from the store
    pub async fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read_file()?;
        let Some(pos) = file.secrets.iter().position(|s| s.key == key) else {
            return Err(Error::NotFound {
                key: key.to_string(),
            });
        };

        file.secrets.remove(pos);
        self.write_file(&file)?;
        info!(key, "Secret deleted");
        Ok(())
    }

    /// Everything the secrets list shows: stored keys plus `known_keys`,
    /// each with its source and the value `strategy` resolves to.
    pub fn snapshot(
        &self,
        known_keys: &[String],
        strategy: KeyRetrievalStrategy,
    ) -> Result<Vec<SecretEntry>> {
        let stored: BTreeMap<String, SecretEntry> = self
            .list()?
            .into_iter()
            .map(|entry| (entry.key.clone(), entry))
            .collect();

        let mut keys: BTreeSet<&str> = stored.keys().map(String::as_str).collect();
        for key in known_keys {
            match validate_key(key) {
                Ok(()) => {
                    keys.insert(key);
                }
                Err(e) => debug!(key = %key, error = %e, "Ignoring invalid known key"),
            }
        }

        let entries = keys
            .into_iter()
            .map(|key| {
                let stored_entry = stored.get(key);
                let env = self.env_value(key);
                let stored_value = stored_entry.and_then(|e| e.value.clone());

                let source = SecretSource::from_presence(stored_entry.is_some(), env.is_some());
                let value = match strategy {
                    KeyRetrievalStrategy::EnvironmentOnly => env,
                    KeyRetrievalStrategy::StoreOnly => stored_value,
                    KeyRetrievalStrategy::Both => env.or(stored_value),
                };

                SecretEntry {
                    key: key.to_string(),
                    source,
                    value,
                    updated_at: stored_entry.and_then(|e| e.updated_at.clone()),
                }
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn store_in(dir: &Path, env: &[(&str, &str)]) -> SecretStore {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SecretStore::at(dir.join(SECRETS_FILE), Cipher::from_key(&[3u8; 32]))
            .with_env_lookup(move |key| env.get(key).cloned())
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[]);

        assert!(store.list().expect("list").is_empty());
        assert!(matches!(
            store.get("OPENAI_API_KEY", KeyRetrievalStrategy::Both),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn set_encrypts_at_rest_and_reads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[]);

        smol::block_on(store.set("OPENAI_API_KEY", "sk-plaintext-value")).expect("set");

        let raw = std::fs::read_to_string(store.path()).expect("read");
        assert!(raw.contains("OPENAI_API_KEY"));
        assert!(!raw.contains("sk-plaintext-value"));

        let value = store
            .get("OPENAI_API_KEY", KeyRetrievalStrategy::StoreOnly)
            .expect("get");
        assert_eq!(value, "sk-plaintext-value");
    }

    #[test]
    fn set_replaces_existing_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[]);

        smol::block_on(store.set("TOKEN", "first")).expect("set");
        smol::block_on(store.set("TOKEN", "second")).expect("set");

        let entries = store.list().expect("list");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value.as_deref(), Some("second"));
        assert!(entries[0].updated_at.is_some());
    }

    #[test]
    fn set_rejects_invalid_key_and_empty_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[]);

        assert!(matches!(
            smol::block_on(store.set("BAD KEY", "value")),
            Err(Error::Invalid { .. })
        ));
        assert!(matches!(
            smol::block_on(store.set("GOOD_KEY", "")),
            Err(Error::Invalid { .. })
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn delete_removes_and_reports_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[]);

        smol::block_on(store.set("A_KEY", "a")).expect("set");
        smol::block_on(store.set("B_KEY", "b")).expect("set");
        smol::block_on(store.delete("A_KEY")).expect("delete");

        let keys: Vec<_> = store.list().expect("list").into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["B_KEY"]);

        assert!(matches!(
            smol::block_on(store.delete("A_KEY")),
            Err(Error::NotFound { key }) if key == "A_KEY"
        ));
    }

    #[test]
    fn strategy_precedence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[("SHARED", "from-env"), ("ENV_ONLY", "env")]);
        smol::block_on(store.set("SHARED", "from-store")).expect("set");

        assert_eq!(
            store.get("SHARED", KeyRetrievalStrategy::Both).expect("both"),
            "from-env"
        );
        assert_eq!(
            store.get("SHARED", KeyRetrievalStrategy::StoreOnly).expect("store"),
            "from-store"
        );
        assert_eq!(
            store
                .get("SHARED", KeyRetrievalStrategy::EnvironmentOnly)
                .expect("env"),
            "from-env"
        );
        assert!(store.get("ENV_ONLY", KeyRetrievalStrategy::StoreOnly).is_err());
        assert_eq!(
            store.get("ENV_ONLY", KeyRetrievalStrategy::Both).expect("both"),
            "env"
        );
    }

    #[test]
    fn empty_env_value_counts_as_unset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[("EMPTY", "")]);

        assert_eq!(store.env_value("EMPTY"), None);
    }

    #[test]
    fn snapshot_merges_known_keys_and_sources() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[("ENV_KEY", "e"), ("BOTH_KEY", "env-wins")]);
        smol::block_on(store.set("STORED_KEY", "s")).expect("set");
        smol::block_on(store.set("BOTH_KEY", "store-value")).expect("set");

        let known = vec![
            "ENV_KEY".to_string(),
            "MISSING_KEY".to_string(),
            "not valid".to_string(),
        ];
        let entries = store
            .snapshot(&known, KeyRetrievalStrategy::Both)
            .expect("snapshot");

        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.key.as_str(), e.source, e.value.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("BOTH_KEY", SecretSource::Both, Some("env-wins")),
                ("ENV_KEY", SecretSource::Environment, Some("e")),
                ("MISSING_KEY", SecretSource::Missing, None),
                ("STORED_KEY", SecretSource::Stored, Some("s")),
            ]
        );
    }

    #[test]
    fn snapshot_store_only_hides_environment_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[("ENV_KEY", "e")]);

        let entries = store
            .snapshot(&["ENV_KEY".to_string()], KeyRetrievalStrategy::StoreOnly)
            .expect("snapshot");
        assert_eq!(entries[0].source, SecretSource::Environment);
        assert_eq!(entries[0].value, None);
    }

    #[test]
    fn concurrent_writes_keep_every_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Arc::new(store_in(dir.path(), &[]));

        for round in 0..5 {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let store = store.clone();
                    std::thread::spawn(move || {
                        smol::block_on(store.set(&format!("K{round}_{i}"), "v"))
                    })
                })
                .collect();
            for handle in handles {
                handle.join().expect("join").expect("set");
            }

            let present = store
                .list()
                .expect("list")
                .iter()
                .filter(|e| e.key.starts_with(&format!("K{round}_")))
                .count();
            assert_eq!(present, 8, "round {round}");
        }

        smol::block_on(store.delete("K0_0")).expect("delete");
        assert_eq!(store.list().expect("list").len(), 39);
        assert!(!dir.path().join("secrets.toml.tmp").exists());
    }

    #[test]
    fn unreadable_entries_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path(), &[]);
        smol::block_on(store.set("GOOD", "value")).expect("set");

        let other = SecretStore::at(store.path(), Cipher::from_key(&[4u8; 32]));
        smol::block_on(other.set("FOREIGN", "value")).expect("set");

        let keys: Vec<_> = store.list().expect("list").into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["GOOD"]);
    }
}
