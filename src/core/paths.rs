//! Storage locations for the backing files.

use std::path::{Path, PathBuf};

use crate::core::constants;
use crate::error::{KeyError, Result};

/// Resolved locations of the two backing files.
///
/// Built once in `main` and passed into the components that touch disk;
/// nothing below the CLI reads ambient global paths.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Passphrase-wrapped identity file.
    pub key_file: PathBuf,
    /// Encrypted secret store document.
    pub store_file: PathBuf,
}

impl Paths {
    /// Resolve the default layout under the user's home directory (`~/.cubby`).
    pub fn resolve() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            KeyError::GenerationFailed("unable to determine home directory".to_string())
        })?;
        Ok(Self::under(&home.join(constants::DATA_DIR)))
    }

    /// Lay out both files under an explicit directory.
    pub fn under(dir: &Path) -> Self {
        Self {
            key_file: dir.join(constants::KEY_FILE),
            store_file: dir.join(constants::STORE_FILE),
        }
    }
}
