//! Cryptographic operations using age encryption.
//!
//! Passwords are sealed to the installation key's x25519 recipient: age
//! wraps an ephemeral file key for the recipient and encrypts the payload
//! with an authenticated stream. The identity itself is wrapped under a
//! user passphrase with age's scrypt recipient and stored ASCII-armored.

use std::io::{Read, Write};
use std::iter;

use age::secrecy::SecretString;
use age::x25519;

use crate::error::{CryptoError, KeyError, Result};

/// Encrypt payload bytes to a single x25519 recipient.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if encryption fails at any stage.
pub fn encrypt(plaintext: &[u8], recipient: &x25519::Recipient) -> Result<Vec<u8>> {
    let encryptor = age::Encryptor::with_recipients(iter::once(recipient as &dyn age::Recipient))
        .map_err(|e| CryptoError::EncryptionFailed(format!("{}", e)))?;

    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut encrypted)
        .map_err(|e| CryptoError::EncryptionFailed(format!("{}", e)))?;

    writer
        .write_all(plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(format!("{}", e)))?;
    writer
        .finish()
        .map_err(|e| CryptoError::EncryptionFailed(format!("{}", e)))?;

    Ok(encrypted)
}

/// Decrypt payload bytes with the installation identity.
///
/// # Errors
///
/// Returns `CryptoError::DecryptionFailed` if the ciphertext is malformed
/// or was not produced for the matching key.
pub fn decrypt(ciphertext: &[u8], identity: &x25519::Identity) -> Result<Vec<u8>> {
    let decryptor = age::Decryptor::new(ciphertext)
        .map_err(|e| CryptoError::DecryptionFailed(format!("{}", e)))?;

    let mut plaintext = Vec::new();
    let mut reader = decryptor
        .decrypt(iter::once(identity as &dyn age::Identity))
        .map_err(|e| CryptoError::DecryptionFailed(format!("{}", e)))?;

    reader
        .read_to_end(&mut plaintext)
        .map_err(|e| CryptoError::DecryptionFailed(format!("{}", e)))?;

    Ok(plaintext)
}

/// Wrap an identity under a passphrase, producing an ASCII-armored blob.
///
/// # Errors
///
/// Returns `KeyError::GenerationFailed` if wrapping fails at any stage.
pub fn wrap_identity(identity: &x25519::Identity, passphrase: &str) -> Result<String> {
    use age::secrecy::ExposeSecret;

    let recipient = age::scrypt::Recipient::new(SecretString::from(passphrase.to_owned()));
    let encryptor = age::Encryptor::with_recipients(iter::once(&recipient as &dyn age::Recipient))
        .map_err(|e| KeyError::GenerationFailed(format!("{}", e)))?;

    let mut wrapped = Vec::new();
    let mut writer = encryptor
        .wrap_output(age::armor::ArmoredWriter::wrap_output(
            &mut wrapped,
            age::armor::Format::AsciiArmor,
        )?)
        .map_err(|e| KeyError::GenerationFailed(format!("{}", e)))?;

    let secret = identity.to_string();
    writer
        .write_all(secret.expose_secret().as_bytes())
        .map_err(|e| KeyError::GenerationFailed(format!("{}", e)))?;
    let armored = writer
        .finish()
        .map_err(|e| KeyError::GenerationFailed(format!("{}", e)))?;
    armored
        .finish()
        .map_err(|e| KeyError::GenerationFailed(format!("{}", e)))?;

    String::from_utf8(wrapped).map_err(|e| KeyError::GenerationFailed(format!("{}", e)).into())
}

/// Unwrap a passphrase-protected identity from its armored form.
///
/// Distinguishes a wrong passphrase from a structurally corrupt key file.
///
/// # Errors
///
/// Returns `KeyError::WrongPassphrase` if the passphrase does not match,
/// `KeyError::Corrupt` for anything else that prevents recovery.
pub fn unwrap_identity(armored: &str, passphrase: &str) -> Result<x25519::Identity> {
    let reader = age::armor::ArmoredReader::new(armored.as_bytes());
    let decryptor =
        age::Decryptor::new(reader).map_err(|e| KeyError::Corrupt(format!("{}", e)))?;

    let identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_owned()));

    let mut contents = Vec::new();
    let mut reader = decryptor
        .decrypt(iter::once(&identity as &dyn age::Identity))
        .map_err(|e| match e {
            age::DecryptError::NoMatchingKeys | age::DecryptError::DecryptionFailed => {
                KeyError::WrongPassphrase
            }
            other => KeyError::Corrupt(format!("{}", other)),
        })?;
    reader
        .read_to_end(&mut contents)
        .map_err(|e| KeyError::Corrupt(format!("{}", e)))?;

    let contents =
        String::from_utf8(contents).map_err(|e| KeyError::Corrupt(format!("{}", e)))?;
    contents
        .trim()
        .parse::<x25519::Identity>()
        .map_err(|e| KeyError::Corrupt(format!("{}", e)).into())
}
