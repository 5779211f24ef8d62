//! The encrypted secret store.
//!
//! A TOML document mapping service → user → base64 ciphertext, loaded in
//! full at startup and rewritten in full (atomically) after every mutation.
//! The document is meant to be human-readable; the passwords in it are not.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::keys::KeyStore;
use crate::error::{CryptoError, Result, StoreError};

/// Metadata table at the top of the secret document.
#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    /// Version of cubby that last wrote the document.
    pub version: String,
}

/// The persisted service → user → ciphertext mapping.
#[derive(Debug, Serialize, Deserialize)]
pub struct SecretStore {
    pub cubby: Meta,
    #[serde(default)]
    services: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(skip)]
    path: PathBuf,
}

impl SecretStore {
    /// Load the store from disk, treating a missing file as an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Parse` if the file exists but is malformed; a
    /// broken document is never repaired or silently replaced.
    pub fn load(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no secret store yet, starting empty");
            return Ok(Self {
                cubby: Meta {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                services: BTreeMap::new(),
                path,
            });
        }

        let contents = fs::read_to_string(&path).map_err(StoreError::ReadFailed)?;
        let mut store: Self = toml::from_str(&contents).map_err(StoreError::Parse)?;
        store.path = path;

        debug!(services = store.services.len(), "secret store loaded");
        Ok(store)
    }

    /// Decrypt the password stored for (service, user), if any.
    ///
    /// Absence is not an error. A present entry that fails to decode or
    /// decrypt is: it means corruption or a foreign key, and returning
    /// "not found" would mask that.
    pub fn get(
        &self,
        keys: &KeyStore,
        service: &str,
        user: &str,
    ) -> Result<Option<Zeroizing<String>>> {
        let Some(encoded) = self.services.get(service).and_then(|users| users.get(user)) else {
            return Ok(None);
        };

        let ciphertext = BASE64
            .decode(encoded.trim())
            .map_err(|e| CryptoError::DecryptionFailed(format!("invalid base64: {}", e)))?;
        let plaintext = keys.open(&ciphertext)?;
        let password = String::from_utf8(plaintext)
            .map_err(|e| CryptoError::DecryptionFailed(format!("UTF-8 error: {}", e)))?;

        Ok(Some(Zeroizing::new(password)))
    }

    /// Encrypt and store a password, overwriting any previous entry.
    ///
    /// The in-memory update and the persist happen together; there is no
    /// observable dirty state between them.
    pub fn set(
        &mut self,
        keys: &KeyStore,
        service: &str,
        user: &str,
        password: &str,
    ) -> Result<()> {
        let sealed = keys.seal(password.as_bytes())?;
        let encoded = BASE64.encode(sealed);

        self.services
            .entry(service.to_string())
            .or_default()
            .insert(user.to_string(), encoded);
        self.save()
    }

    /// Remove the entry for (service, user), pruning an emptied service.
    ///
    /// Returns whether an entry existed. Nothing is written when nothing
    /// changed.
    pub fn remove(&mut self, service: &str, user: &str) -> Result<bool> {
        let Some(users) = self.services.get_mut(service) else {
            return Ok(false);
        };
        if users.remove(user).is_none() {
            return Ok(false);
        }
        if users.is_empty() {
            self.services.remove(service);
        }
        self.save()?;
        Ok(true)
    }

    /// Known service names.
    pub fn services(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// Known user names for a service. Unknown services list as empty.
    pub fn users(&self, service: &str) -> Vec<&str> {
        self.services
            .get(service)
            .map(|users| users.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Serialize and atomically replace the backing file.
    ///
    /// The whole document is rewritten on every mutation; the rename keeps
    /// a crash from tearing it. Concurrent writers can still lose updates
    /// to each other (last rename wins).
    fn save(&self) -> Result<()> {
        debug!(path = %self.path.display(), "saving secret store");

        let contents = toml::to_string_pretty(self).map_err(StoreError::Serialize)?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(StoreError::WriteFailed)?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        let mut file = fs::File::create(&tmp).map_err(StoreError::WriteFailed)?;
        file.write_all(contents.as_bytes())
            .map_err(StoreError::WriteFailed)?;
        file.sync_all().map_err(StoreError::WriteFailed)?;
        fs::rename(&tmp, &self.path).map_err(StoreError::WriteFailed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::PassphraseSource;
    use crate::core::paths::Paths;
    use crate::error::Error;
    use tempfile::TempDir;

    struct Fixed;

    impl PassphraseSource for Fixed {
        fn passphrase(&self, _confirm: bool) -> Result<Zeroizing<String>> {
            Ok(Zeroizing::new("hunter2".to_string()))
        }
    }

    fn setup() -> (TempDir, Paths, KeyStore) {
        let tmp = TempDir::new().unwrap();
        let paths = Paths::under(&tmp.path().join(".cubby"));
        let keys = KeyStore::ensure(&paths, &Fixed).unwrap();
        (tmp, paths, keys)
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_tmp, paths, keys) = setup();
        let mut store = SecretStore::load(paths.store_file.clone()).unwrap();

        store.set(&keys, "github", "alice", "s3cr3t").unwrap();

        let password = store.get(&keys, "github", "alice").unwrap().unwrap();
        assert_eq!(password.as_str(), "s3cr3t");
    }

    #[test]
    fn test_overwrite_leaves_only_latest() {
        let (_tmp, paths, keys) = setup();
        let mut store = SecretStore::load(paths.store_file.clone()).unwrap();

        store.set(&keys, "github", "alice", "first").unwrap();
        store.set(&keys, "github", "alice", "second").unwrap();

        let password = store.get(&keys, "github", "alice").unwrap().unwrap();
        assert_eq!(password.as_str(), "second");
        assert_eq!(store.users("github"), vec!["alice"]);
    }

    #[test]
    fn test_absent_entry_is_not_an_error() {
        let (_tmp, paths, keys) = setup();
        let store = SecretStore::load(paths.store_file.clone()).unwrap();

        assert!(store.get(&keys, "gitlab", "bob").unwrap().is_none());
    }

    #[test]
    fn test_persistence_roundtrip() {
        let (_tmp, paths, keys) = setup();

        {
            let mut store = SecretStore::load(paths.store_file.clone()).unwrap();
            store.set(&keys, "github", "alice", "s3cr3t").unwrap();
            store.set(&keys, "github", "bob", "hunter2").unwrap();
            store.set(&keys, "aws", "root", "t0psecret").unwrap();
        }

        let reloaded = SecretStore::load(paths.store_file.clone()).unwrap();
        assert_eq!(reloaded.services(), vec!["aws", "github"]);
        assert_eq!(reloaded.users("github"), vec!["alice", "bob"]);
        assert_eq!(
            reloaded.get(&keys, "github", "alice").unwrap().unwrap().as_str(),
            "s3cr3t"
        );
        assert_eq!(
            reloaded.get(&keys, "aws", "root").unwrap().unwrap().as_str(),
            "t0psecret"
        );
    }

    #[test]
    fn test_remove_prunes_empty_service() {
        let (_tmp, paths, keys) = setup();
        let mut store = SecretStore::load(paths.store_file.clone()).unwrap();

        store.set(&keys, "github", "alice", "s3cr3t").unwrap();
        assert!(store.remove("github", "alice").unwrap());
        assert!(store.services().is_empty());

        // Second remove is a no-op
        assert!(!store.remove("github", "alice").unwrap());
    }

    #[test]
    fn test_unknown_service_lists_no_users() {
        let (_tmp, paths, _keys) = setup();
        let store = SecretStore::load(paths.store_file.clone()).unwrap();

        assert!(store.users("nowhere").is_empty());
    }

    #[test]
    fn test_malformed_document_fails_to_load() {
        let (_tmp, paths, _keys) = setup();

        fs::create_dir_all(paths.store_file.parent().unwrap()).unwrap();
        fs::write(&paths.store_file, "this is [not valid toml").unwrap();

        let result = SecretStore::load(paths.store_file.clone());
        assert!(matches!(result, Err(Error::Store(StoreError::Parse(_)))));
    }

    #[test]
    fn test_tampered_ciphertext_fails_loudly() {
        let (_tmp, paths, keys) = setup();

        {
            let mut store = SecretStore::load(paths.store_file.clone()).unwrap();
            store.set(&keys, "github", "alice", "s3cr3t").unwrap();
        }

        // Flip the stored ciphertext to valid base64 of garbage bytes
        let contents = fs::read_to_string(&paths.store_file).unwrap();
        let mut store: SecretStore = toml::from_str(&contents).unwrap();
        store
            .services
            .get_mut("github")
            .unwrap()
            .insert("alice".to_string(), BASE64.encode(b"garbage"));
        store.path = paths.store_file.clone();
        store.save().unwrap();

        let reloaded = SecretStore::load(paths.store_file.clone()).unwrap();
        let result = reloaded.get(&keys, "github", "alice");
        assert!(matches!(
            result,
            Err(Error::Crypto(CryptoError::DecryptionFailed(_)))
        ));
    }

    #[test]
    fn test_invalid_base64_fails_loudly() {
        let (_tmp, paths, keys) = setup();

        {
            let mut store = SecretStore::load(paths.store_file.clone()).unwrap();
            store.set(&keys, "github", "alice", "s3cr3t").unwrap();
        }

        let contents = fs::read_to_string(&paths.store_file).unwrap();
        let tampered = contents.replace(
            contents
                .lines()
                .find(|l| l.starts_with("alice"))
                .unwrap(),
            "alice = \"!!! not base64 !!!\"",
        );
        fs::write(&paths.store_file, tampered).unwrap();

        let reloaded = SecretStore::load(paths.store_file.clone()).unwrap();
        let result = reloaded.get(&keys, "github", "alice");
        assert!(matches!(
            result,
            Err(Error::Crypto(CryptoError::DecryptionFailed(_)))
        ));
    }
}
