//! Key lifecycle: first-run generation and per-run unlock.
//!
//! Exactly one key exists per installation. It is generated the first time
//! any command runs, wrapped under a user passphrase, and unlocked from
//! disk on every run after that. Losing the passphrase loses every stored
//! password; there is no recovery path.

use std::fs;
use std::io::Write;
use std::path::Path;

use age::x25519;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::crypto;
use crate::core::paths::Paths;
use crate::error::{KeyError, Result};

/// Produces the passphrase protecting the key file.
///
/// Injected so the core stays testable without a terminal: the CLI supplies
/// a prompting implementation, tests supply a fixed string.
pub trait PassphraseSource {
    /// Obtain the passphrase. `confirm` is set when a new key is being
    /// created and the source should double-check the entry.
    fn passphrase(&self, confirm: bool) -> Result<Zeroizing<String>>;
}

/// The unlocked installation key.
pub struct KeyStore {
    identity: x25519::Identity,
    recipient: x25519::Recipient,
}

impl KeyStore {
    /// Unlock the installation key, generating it first if absent.
    ///
    /// Called once per process; the resulting value serves all transforms.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::WrongPassphrase` if an existing key file does not
    /// unlock, `KeyError::Corrupt` if it is unreadable or malformed, and
    /// `KeyError::GenerationFailed` if first-run creation fails.
    pub fn ensure(paths: &Paths, source: &dyn PassphraseSource) -> Result<Self> {
        if paths.key_file.exists() {
            Self::unlock(&paths.key_file, source)
        } else {
            Self::generate(&paths.key_file, source)
        }
    }

    fn generate(key_file: &Path, source: &dyn PassphraseSource) -> Result<Self> {
        info!("no key file found, generating one");

        let passphrase = source.passphrase(true)?;
        if passphrase.is_empty() {
            return Err(KeyError::EmptyPassphrase.into());
        }

        let identity = x25519::Identity::generate();
        let wrapped = crypto::wrap_identity(&identity, &passphrase)?;

        if let Some(dir) = key_file.parent() {
            fs::create_dir_all(dir).map_err(KeyError::WriteFailed)?;
        }
        write_private(key_file, wrapped.as_bytes())?;

        debug!(path = %key_file.display(), "key file written");

        let recipient = identity.to_public();
        Ok(Self {
            identity,
            recipient,
        })
    }

    fn unlock(key_file: &Path, source: &dyn PassphraseSource) -> Result<Self> {
        debug!(path = %key_file.display(), "unlocking key file");

        let armored = fs::read_to_string(key_file).map_err(KeyError::ReadFailed)?;
        let passphrase = source.passphrase(false)?;
        let identity = crypto::unwrap_identity(&armored, &passphrase)?;

        let recipient = identity.to_public();
        Ok(Self {
            identity,
            recipient,
        })
    }

    /// Encrypt plaintext bytes under the installation key.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        crypto::encrypt(plaintext, &self.recipient)
    }

    /// Recover plaintext bytes previously sealed under the installation key.
    pub fn open(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        crypto::decrypt(ciphertext, &self.identity)
    }

    /// The public half of the installation key.
    pub fn recipient(&self) -> &x25519::Recipient {
        &self.recipient
    }
}

/// Write the key file atomically with owner-only permissions.
///
/// The temp file gets its permissions restricted before the rename, so the
/// wrapped key is never visible to other users, even briefly.
fn write_private(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = path.with_extension("key.tmp");

    let mut file = fs::File::create(&tmp).map_err(KeyError::WriteFailed)?;
    file.write_all(contents).map_err(KeyError::WriteFailed)?;
    file.sync_all().map_err(KeyError::WriteFailed)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
            .map_err(KeyError::WriteFailed)?;
    }

    fs::rename(&tmp, path).map_err(KeyError::WriteFailed)?;
    Ok(())
}
