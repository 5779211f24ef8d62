//! Cubby - a passphrase-locked password keeper for one person.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── set           # Store a password
//! │   ├── get           # Print a password
//! │   ├── rm            # Delete an entry
//! │   ├── list          # Service and user listings
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── paths         # Backing file locations
//!     ├── crypto        # age encryption plumbing
//!     ├── keys          # Key generation and per-run unlock
//!     └── store         # Encrypted service/user/password mapping
//! ```
//!
//! # Features
//!
//! - One x25519 key per installation, wrapped under a passphrase (scrypt)
//! - Hybrid encryption per password via age
//! - Human-editable TOML store, rewritten atomically on every change
//! - Injected passphrase source, so the core never talks to a terminal
//!
//! Known limitation: there is no file locking. Concurrent mutating
//! invocations race on the full-document rewrite and the last writer wins.

pub mod cli;
pub mod core;
pub mod error;
