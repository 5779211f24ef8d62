//! Store a password.

use tracing::info;
use zeroize::Zeroizing;

use crate::cli::{output, prompt};
use crate::core::keys::KeyStore;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Encrypt and store a password for (service, user).
///
/// Setting an existing pair overwrites it; the previous value is gone once
/// the store is rewritten.
pub fn execute(
    keys: &KeyStore,
    store: &mut SecretStore,
    service: &str,
    user: &str,
    password: Option<String>,
) -> Result<()> {
    info!(service, user, "storing password");

    let password = match password {
        Some(value) => Zeroizing::new(value),
        None => prompt::password_value(service, user)?,
    };

    store.set(keys, service, user, &password)?;
    output::success(&format!(
        "stored {}",
        output::key(&format!("{}/{}", service, user))
    ));
    Ok(())
}
