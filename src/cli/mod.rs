//! Command-line interface.

pub mod completions;
pub mod get;
pub mod list;
pub mod output;
pub mod prompt;
pub mod rm;
pub mod set;

use clap::{Parser, Subcommand};

use crate::core::keys::KeyStore;
use crate::core::paths::Paths;
use crate::core::store::SecretStore;
use crate::error::Result;

/// Cubby - a passphrase-locked password keeper for one person.
///
/// With no arguments it lists known services; with one it lists that
/// service's users; with two it prints the stored password.
#[derive(Parser)]
#[command(
    name = "cubby",
    about = "A passphrase-locked password keeper for one person",
    version,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Service to look up (lists its users; lists all services when omitted)
    pub service: Option<String>,

    /// User whose password to print
    pub user: Option<String>,

    /// Output listings as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Store a password for a (service, user) pair
    Set {
        /// Service the password belongs to (e.g. github)
        service: String,
        /// User name within the service
        user: String,
        /// Password value (prompted with hidden input when omitted)
        password: Option<String>,
    },

    /// Remove a stored password
    Rm {
        /// Service the password belongs to
        service: String,
        /// User name within the service
        user: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a parsed invocation.
pub fn execute(cli: Cli) -> Result<()> {
    // Completions need no key material or store access.
    if let Some(Command::Completions { shell }) = &cli.command {
        return completions::execute(*shell);
    }

    let paths = Paths::resolve()?;
    let keys = KeyStore::ensure(&paths, &prompt::Terminal)?;
    let mut store = SecretStore::load(paths.store_file)?;

    match cli.command {
        Some(Command::Set {
            service,
            user,
            password,
        }) => set::execute(&keys, &mut store, &service, &user, password),
        Some(Command::Rm { service, user }) => rm::execute(&mut store, &service, &user),
        Some(Command::Completions { .. }) => unreachable!("handled above"),
        None => match (cli.service, cli.user) {
            (Some(service), Some(user)) => get::execute(&keys, &store, &service, &user),
            (Some(service), None) => list::users(&store, &service, cli.json),
            (None, _) => list::services(&store, cli.json),
        },
    }
}
