//! Cubby - a passphrase-locked password keeper for one person.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cubby::cli::output;
use cubby::cli::{execute, Cli};
use cubby::core::constants;
use cubby::error::{Error, KeyError, StoreError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("cubby=debug")
        } else {
            EnvFilter::new("cubby=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        // Format error with suggestion if available
        let error_msg = e.to_string();
        let suggestion = match &e {
            Error::Key(KeyError::WrongPassphrase) => {
                Some("check the passphrase, or set CUBBY_PASSPHRASE for scripted use")
            }
            Error::Key(KeyError::EmptyPassphrase) => {
                Some("choose a non-empty passphrase; it protects every stored password")
            }
            Error::Store(StoreError::Parse(_)) => {
                Some("fix or move ~/.cubby/secrets.toml; it is not repaired automatically")
            }
            _ => None,
        };

        output::error(&error_msg);
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
