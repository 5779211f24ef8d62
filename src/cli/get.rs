//! Print a stored password.

use crate::cli::output;
use crate::core::keys::KeyStore;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Print the decrypted password for (service, user) on stdout.
///
/// An absent entry prints nothing there and exits successfully; absence is
/// not an error. Only a present entry that fails to decrypt is.
pub fn execute(keys: &KeyStore, store: &SecretStore, service: &str, user: &str) -> Result<()> {
    match store.get(keys, service, user)? {
        Some(password) => println!("{}", password.as_str()),
        None => output::note(&format!("no password for {}/{}", service, user)),
    }
    Ok(())
}
