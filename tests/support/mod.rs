//! Test support utilities for cubby integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;

use tempfile::TempDir;

/// Passphrase used by every test invocation unless overridden.
pub const PASSPHRASE: &str = "correct horse battery staple";

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary working dir and home dir, so key and
/// store files never leak between tests. No process-global state is
/// mutated: child processes use `.current_dir()` and their own HOME, so
/// tests can safely run in parallel.
pub struct Test {
    /// Temporary working directory for the invocation
    pub dir: TempDir,
    /// Temporary home directory holding ~/.cubby
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with passwords already stored.
    pub fn with_passwords(entries: &[(&str, &str, &str)]) -> Self {
        let t = Self::new();
        for (service, user, password) in entries {
            let output = t.set(service, user, password);
            assert!(
                output.status.success(),
                "Failed to set {}/{}: {}",
                service,
                user,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Path to the key file inside the temp home.
    pub fn key_file(&self) -> std::path::PathBuf {
        self.home.path().join(".cubby").join("identity.key")
    }

    /// Path to the secret store inside the temp home.
    pub fn store_file(&self) -> std::path::PathBuf {
        self.home.path().join(".cubby").join("secrets.toml")
    }
}
