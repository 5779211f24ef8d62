use thiserror::Error;

/// Top-level error type aggregating the domain-specific kinds.
///
/// Everything here is unrecoverable for a single-shot invocation: the CLI
/// prints the message (plus a hint where one helps) and exits non-zero.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from key generation and unlock.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("key generation failed: {0}")]
    GenerationFailed(String),

    #[error("wrong passphrase: key file could not be unlocked")]
    WrongPassphrase,

    #[error("key file is corrupt: {0}")]
    Corrupt(String),

    #[error("passphrase must not be empty")]
    EmptyPassphrase,

    #[error("failed to read key file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write key file: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors from the persisted secret store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret store is malformed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize secret store: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to read secret store: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write secret store: {0}")]
    WriteFailed(#[source] std::io::Error),
}

/// Errors from the encryption layer.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
