//! Secret Entries
//!
//! In-memory and on-disk representations of a named secret, plus the rules
//! a secret key must follow.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Where a secret's value can be resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretSource {
    /// Only in the encrypted store
    Stored,
    /// Only in the process environment
    Environment,
    /// In both; which one wins depends on the retrieval strategy
    Both,
    /// A known key with no value anywhere
    Missing,
}

impl SecretSource {
    /// Combine store and environment presence into a source
    pub fn from_presence(stored: bool, environment: bool) -> Self {
        match (stored, environment) {
            (true, true) => SecretSource::Both,
            (true, false) => SecretSource::Stored,
            (false, true) => SecretSource::Environment,
            (false, false) => SecretSource::Missing,
        }
    }

    /// Whether the store holds a value that can be deleted
    pub fn is_stored(&self) -> bool {
        matches!(self, SecretSource::Stored | SecretSource::Both)
    }

    /// Translation key suffix for the source badge
    pub fn label_key(&self) -> &'static str {
        match self {
            SecretSource::Stored => "source_stored",
            SecretSource::Environment => "source_env",
            SecretSource::Both => "source_both",
            SecretSource::Missing => "source_missing",
        }
    }
}

/// How a secret value is looked up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRetrievalStrategy {
    /// Only look in environment variables
    EnvironmentOnly,
    /// Only look in the encrypted store
    StoreOnly,
    /// Environment first, then the store
    #[default]
    Both,
}

/// A secret as shown in the list
#[derive(Debug, Clone, PartialEq)]
pub struct SecretEntry {
    /// Key name (also the environment variable name)
    pub key: String,
    /// Where the value comes from
    pub source: SecretSource,
    /// Resolved plaintext value, if any
    pub value: Option<String>,
    /// Last store update (RFC3339)
    pub updated_at: Option<String>,
}

/// Persisted secret; `value` is always ciphertext
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoredSecret {
    pub key: String,
    pub value: String,
    pub updated_at: Option<String>,
}

/// Check that `key` is usable as an environment variable name:
/// non-empty ASCII letters, digits and `_`, not starting with a digit.
pub fn validate_key(key: &str) -> Result<()> {
    let Some(first) = key.chars().next() else {
        return Err(Error::Invalid {
            message: "Secret key must not be empty".to_string(),
        });
    };

    if first.is_ascii_digit() {
        return Err(Error::Invalid {
            message: format!("Secret key must not start with a digit: {key}"),
        });
    }

    if let Some(bad) = key.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(Error::Invalid {
            message: format!("Secret key contains invalid character {bad:?}: {key}"),
        });
    }

    Ok(())
}
