//! Remove a stored password.

use crate::cli::output;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Delete the entry for (service, user).
pub fn execute(store: &mut SecretStore, service: &str, user: &str) -> Result<()> {
    if store.remove(service, user)? {
        output::success(&format!("removed {}/{}", service, user));
    } else {
        output::warn(&format!("nothing stored for {}/{}", service, user));
    }
    Ok(())
}
