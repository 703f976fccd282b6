// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the persisted settings file and the sealing of
//! provider credentials. Everything goes through the [`SettingsStore`] trait
//! so the session can be driven against an in-memory store in tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{Engine, engine::general_purpose::STANDARD};
use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng, Payload},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::DEFAULT_THEME_ID;

pub(crate) const CONFIG_NAME: &str = "dreadtale";

const KEY_FILE: &str = "secret.key";
const SAVE_DIR: &str = "saves";
const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to read or write settings: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("failed to access key file: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored key is malformed")]
    MalformedKey,

    #[error("failed to seal secret")]
    Seal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) version: u32,
    pub(crate) theme_id: String,
    pub(crate) provider_id: Option<String>,
    pub(crate) encrypted_secret: Option<String>,
    pub(crate) save_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            theme_id: DEFAULT_THEME_ID.to_string(),
            provider_id: None,
            encrypted_secret: None,
            save_dir: None,
        }
    }
}

impl Settings {
    pub(crate) fn is_configured(&self) -> bool {
        self.provider_id.is_some() && self.encrypted_secret.is_some()
    }
}

pub(crate) trait SettingsStore {
    fn load(&self) -> Result<Settings, StoreError>;

    fn save(&self, settings: &Settings) -> Result<(), StoreError>;

    /// Seals `secret` for `provider_id` and records both in `settings`.
    fn encrypt_secret(
        &self,
        settings: &mut Settings,
        provider_id: &str,
        secret: &str,
    ) -> Result<(), StoreError>;

    /// Whether a provider is recorded and its sealed secret is usable.
    fn is_configured(&self, settings: &Settings) -> bool;

    fn has_save_files(&self, settings: &Settings) -> bool;
}

/// Settings persisted with `confy` in the platform configuration directory.
pub(crate) struct ConfyStore {
    config_path: PathBuf,
    key_path: PathBuf,
    default_save_dir: PathBuf,
}

impl ConfyStore {
    pub(crate) fn new() -> Result<Self, StoreError> {
        let config_path = confy::get_configuration_file_path(CONFIG_NAME, None)?;
        Ok(Self::at(config_path))
    }

    pub(crate) fn at(config_path: PathBuf) -> Self {
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            key_path: dir.join(KEY_FILE),
            default_save_dir: dir.join(SAVE_DIR),
            config_path,
        }
    }

    pub(crate) fn config_dir(&self) -> Option<&Path> {
        self.config_path.parent()
    }

    fn load_key(&self) -> Result<Key, StoreError> {
        let encoded = fs::read_to_string(&self.key_path)?;
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| StoreError::MalformedKey)?;
        if bytes.len() != 32 {
            return Err(StoreError::MalformedKey);
        }
        Ok(*Key::from_slice(&bytes))
    }

    fn load_or_create_key(&self) -> Result<Key, StoreError> {
        if self.key_path.exists() {
            return self.load_key();
        }

        let key = ChaCha20Poly1305::generate_key(&mut OsRng);
        if let Some(dir) = self.key_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.key_path, STANDARD.encode(key))?;
        tracing::info!(path = %self.key_path.display(), "generated new secret key");
        Ok(key)
    }
}

impl SettingsStore for ConfyStore {
    fn load(&self) -> Result<Settings, StoreError> {
        Ok(confy::load_path(&self.config_path)?)
    }

    fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        confy::store_path(&self.config_path, settings)?;
        Ok(())
    }

    fn encrypt_secret(
        &self,
        settings: &mut Settings,
        provider_id: &str,
        secret: &str,
    ) -> Result<(), StoreError> {
        let key = self.load_or_create_key()?;
        settings.encrypted_secret = Some(seal(&key, provider_id, secret)?);
        settings.provider_id = Some(provider_id.to_string());
        Ok(())
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.is_configured() && self.reveal_secret(settings).is_some()
    }

    fn has_save_files(&self, settings: &Settings) -> bool {
        let dir = settings.save_dir.as_deref().unwrap_or(&self.default_save_dir);
        dir_has_saves(dir)
    }
}

/// Encrypts `secret`, binding it to `provider_id`, and returns
/// base64(nonce || ciphertext).
fn seal(key: &Key, provider_id: &str, secret: &str) -> Result<String, StoreError> {
    let cipher = ChaCha20Poly1305::new(key);
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: secret.as_bytes(),
                aad: provider_id.as_bytes(),
            },
        )
        .map_err(|_| StoreError::Seal)?;

    let mut sealed = nonce.to_vec();
    sealed.extend(ciphertext);
    Ok(STANDARD.encode(sealed))
}

fn open(key: &Key, provider_id: &str, sealed: &str) -> Option<String> {
    let bytes = STANDARD.decode(sealed).ok()?;
    if bytes.len() <= NONCE_LEN {
        return None;
    }
    let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
    let plain = ChaCha20Poly1305::new(key)
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: provider_id.as_bytes(),
            },
        )
        .ok()?;
    String::from_utf8(plain).ok()
}

impl ConfyStore {
    /// Recovers the stored secret, if one is present and the key still opens
    /// it.
    pub(crate) fn reveal_secret(&self, settings: &Settings) -> Option<String> {
        let provider_id = settings.provider_id.as_deref()?;
        let sealed = settings.encrypted_secret.as_deref()?;
        let key = self.load_key().ok()?;
        open(&key, provider_id, sealed)
    }
}

fn dir_has_saves(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .any(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        })
        .unwrap_or(false)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfyStore {
        ConfyStore::at(dir.path().join("dreadtale.toml"))
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = store_in(&dir).load().unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.is_configured());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let settings = Settings {
            theme_id: "phosphor".to_string(),
            ..Settings::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap().theme_id, "phosphor");
    }

    #[test]
    fn test_sealed_secret_is_not_plaintext_and_opens() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut settings = Settings::default();

        store
            .encrypt_secret(&mut settings, "openai", "sk-test-123456")
            .unwrap();

        assert!(store.is_configured(&settings));
        let sealed = settings.encrypted_secret.clone().unwrap();
        assert!(!sealed.contains("sk-test"));
        assert_eq!(store.reveal_secret(&settings).as_deref(), Some("sk-test-123456"));
    }

    #[test]
    fn test_secret_is_bound_to_provider() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut settings = Settings::default();
        store
            .encrypt_secret(&mut settings, "openai", "sk-test-123456")
            .unwrap();

        settings.provider_id = Some("anthropic".to_string());
        assert_eq!(store.reveal_secret(&settings), None);
        assert!(!store.is_configured(&settings));
    }

    #[test]
    fn test_save_file_detection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let saves = dir.path().join("saves");
        let settings = Settings {
            save_dir: Some(saves.clone()),
            ..Settings::default()
        };

        assert!(!store.has_save_files(&settings));
        fs::create_dir_all(&saves).unwrap();
        fs::write(saves.join("notes.txt"), "x").unwrap();
        assert!(!store.has_save_files(&settings));
        fs::write(saves.join("run-1.json"), "{}").unwrap();
        assert!(store.has_save_files(&settings));
    }
}
