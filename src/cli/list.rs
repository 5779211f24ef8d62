//! Listing commands for services and users.

use crate::cli::output;
use crate::core::store::SecretStore;
use crate::error::Result;

/// List all known service names.
pub fn services(store: &SecretStore, json: bool) -> Result<()> {
    let services = store.services();

    if json {
        let payload = serde_json::json!({
            "services": services,
            "count": services.len()
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if services.is_empty() {
        output::dimmed("no services stored");
    } else {
        for service in services {
            output::list_item(service);
        }
    }

    Ok(())
}

/// List known user names for one service.
///
/// An unknown service lists as empty rather than failing.
pub fn users(store: &SecretStore, service: &str, json: bool) -> Result<()> {
    let users = store.users(service);

    if json {
        let payload = serde_json::json!({
            "service": service,
            "users": users,
            "count": users.len()
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if users.is_empty() {
        output::dimmed(&format!("no users stored for {}", service));
    } else {
        for user in users {
            output::list_item(user);
        }
    }

    Ok(())
}
