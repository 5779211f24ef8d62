//! Constants used throughout cubby.
//!
//! Centralizes magic strings and configuration values.

/// Data directory relative to HOME (~/.cubby).
pub const DATA_DIR: &str = ".cubby";

/// Passphrase-wrapped identity file name.
pub const KEY_FILE: &str = "identity.key";

/// Encrypted secret store file name.
pub const STORE_FILE: &str = "secrets.toml";

/// Environment variable consulted for a non-interactive passphrase.
pub const PASSPHRASE_ENV: &str = "CUBBY_PASSPHRASE";

/// Environment variable controlling the tracing filter.
pub const LOG_ENV: &str = "CUBBY_LOG";
