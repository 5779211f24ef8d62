//! Passphrase and password prompts.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::keys::PassphraseSource;
use crate::error::Result;

/// Interactive passphrase source backed by the terminal.
///
/// `CUBBY_PASSPHRASE` overrides the prompt for scripted use; treat that as
/// a convenience for automation, not a place to keep the passphrase.
pub struct Terminal;

impl PassphraseSource for Terminal {
    fn passphrase(&self, confirm: bool) -> Result<Zeroizing<String>> {
        if let Ok(pass) = std::env::var(constants::PASSPHRASE_ENV) {
            return Ok(Zeroizing::new(pass));
        }

        let mut prompt = Password::new().with_prompt(if confirm {
            "New passphrase for the key file"
        } else {
            "Passphrase"
        });
        if confirm {
            prompt = prompt.with_confirmation("Confirm passphrase", "passphrases do not match");
        }

        Ok(Zeroizing::new(prompt.interact()?))
    }
}

/// Read a password value for `set`: piped stdin wins, otherwise a hidden
/// prompt.
pub fn password_value(service: &str, user: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return Ok(Zeroizing::new(input.trim_end().to_string()));
    }

    let value = Password::new()
        .with_prompt(format!("Password for {}/{}", service, user))
        .interact()?;
    Ok(Zeroizing::new(value))
}
