//! String manipulation and cryptography utilities.
//!
//! This module provides utility functions for:
//! - AES-256-GCM encryption and decryption of secret values
//! - Base64 encoding/decoding for storage
//! - Masking secret values for display

use crate::error::{Error, Result};
use crate::helpers::create_private_file;
use aes_gcm::{
    Aes256Gcm, Key,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use std::fs;
use std::path::Path;
use tracing::info;

/// Nonce length for AES-256-GCM (96 bits)
const NONCE_LEN: usize = 12;
/// Key length for AES-256-GCM (256 bits)
const KEY_LEN: usize = 32;

/// Placeholder shown instead of a secret value
pub const MASK: &str = "••••••••";

/// AES-256-GCM cipher bound to one installation's key.
#[derive(Clone)]
pub struct Cipher {
    inner: Aes256Gcm,
}

impl Cipher {
    /// Build a cipher from raw key bytes.
    pub fn from_key(key: &[u8; KEY_LEN]) -> Self {
        Self {
            inner: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    /// Load the key stored at `path`, generating and persisting a fresh
    /// random key the first time.
    ///
    /// The key file holds the Base64 encoding of 32 random bytes.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let encoded = fs::read_to_string(path)?;
            let bytes = BASE64.decode(encoded.trim()).map_err(|e| Error::Crypto {
                message: format!("Key file is not valid Base64: {e}"),
            })?;
            let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| Error::Crypto {
                message: format!("Key file must contain {KEY_LEN} bytes"),
            })?;
            return Ok(Self::from_key(&key));
        }

        let key = Aes256Gcm::generate_key(&mut OsRng);
        create_private_file(path, BASE64.encode(key.as_slice()).as_bytes())?;
        info!(path = ?path, "Generated new secret key");

        Ok(Self {
            inner: Aes256Gcm::new(&key),
        })
    }

    /// Encrypts a plaintext string.
    ///
    /// Output is Base64 of `[nonce (12 bytes)][ciphertext]`; every call uses
    /// a fresh random nonce.
    pub fn encrypt(&self, plain_text: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .inner
            .encrypt(&nonce, plain_text.as_bytes())
            .map_err(|e| Error::Crypto {
                message: format!("Encryption failed: {e}"),
            })?;

        let mut combined = nonce.to_vec();
        combined.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(combined))
    }

    /// Decrypts a value produced by [`Cipher::encrypt`].
    pub fn decrypt(&self, cipher_text: &str) -> Result<String> {
        let data = BASE64.decode(cipher_text).map_err(|e| Error::Crypto {
            message: format!("Base64 decode failed: {e}"),
        })?;

        if data.len() < NONCE_LEN {
            return Err(Error::Crypto {
                message: "Ciphertext too short".to_string(),
            });
        }

        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
        let nonce = Nonce::<Aes256Gcm>::from_slice(nonce_bytes);

        let plaintext_bytes = self
            .inner
            .decrypt(nonce, ciphertext)
            .map_err(|e| Error::Crypto {
                message: format!("Decryption failed: {e}"),
            })?;

        String::from_utf8(plaintext_bytes).map_err(|e| Error::Crypto {
            message: format!("UTF-8 decode failed: {e}"),
        })
    }
}

/// Mask a secret value for display.
///
/// Values of 8 characters or fewer are fully hidden; longer values keep
/// their last 4 characters so users can tell keys apart.
pub fn mask_secret(value: &str) -> String {
    let count = value.chars().count();
    if count <= 8 {
        return MASK.to_string();
    }

    let tail: String = value.chars().skip(count - 4).collect();
    format!("{MASK}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> Cipher {
        Cipher::from_key(&[7u8; KEY_LEN])
    }

    #[test]
    fn test_encrypt_decrypt() {
        let plain = "sk-live-1234567890";
        let encrypted = cipher().encrypt(plain).expect("Encryption failed");
        let decrypted = cipher().decrypt(&encrypted).expect("Decryption failed");
        assert_eq!(plain, decrypted);
        assert!(!encrypted.contains(plain));
    }

    #[test]
    fn test_encrypt_produces_different_ciphertext() {
        let encrypted1 = cipher().encrypt("test").expect("Encryption failed");
        let encrypted2 = cipher().encrypt("test").expect("Encryption failed");
        assert_ne!(encrypted1, encrypted2);
    }

    #[test]
    fn test_decrypt_with_other_key_fails() {
        let encrypted = cipher().encrypt("test").expect("Encryption failed");
        let other = Cipher::from_key(&[9u8; KEY_LEN]);
        assert!(matches!(other.decrypt(&encrypted), Err(Error::Crypto { .. })));
    }

    #[test]
    fn test_decrypt_invalid_base64() {
        assert!(cipher().decrypt("not_valid_base64!!!").is_err());
    }

    #[test]
    fn test_decrypt_too_short() {
        assert!(cipher().decrypt("AQIDBA==").is_err());
    }

    #[test]
    fn test_load_or_create_reuses_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("master.key");

        let first = Cipher::load_or_create(&path).expect("create");
        let encrypted = first.encrypt("value").expect("encrypt");

        let second = Cipher::load_or_create(&path).expect("load");
        assert_eq!(second.decrypt(&encrypted).expect("decrypt"), "value");
    }

    #[cfg(unix)]
    #[test]
    fn test_new_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("master.key");
        Cipher::load_or_create(&path).expect("create");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_rejects_short_key_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("master.key");
        fs::write(&path, BASE64.encode([1u8; 8])).expect("write");

        assert!(matches!(
            Cipher::load_or_create(&path),
            Err(Error::Crypto { .. })
        ));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), MASK);
        assert_eq!(mask_secret("12345678"), MASK);
        assert_eq!(mask_secret("sk-abcdef123456"), format!("{MASK}3456"));
    }
}
