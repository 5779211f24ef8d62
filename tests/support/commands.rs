//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a cubby command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - CUBBY_PASSPHRASE set so no prompt is needed
    /// - Current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        self.cmd_with_passphrase(super::PASSPHRASE)
    }

    /// Same as `cmd` but with an explicit passphrase.
    pub fn cmd_with_passphrase(&self, passphrase: &str) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("cubby").expect("failed to find cubby binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("CUBBY_PASSPHRASE", passphrase);
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `cubby set` command.
    pub fn set(&self, service: &str, user: &str, password: &str) -> Output {
        self.cmd()
            .args(["set", service, user, password])
            .output()
            .expect("failed to run cubby set")
    }

    /// Shortcut for `cubby SERVICE USER` (print a password).
    pub fn get(&self, service: &str, user: &str) -> Output {
        self.cmd()
            .args([service, user])
            .output()
            .expect("failed to run cubby get")
    }

    /// Shortcut for `cubby rm` command.
    pub fn rm(&self, service: &str, user: &str) -> Output {
        self.cmd()
            .args(["rm", service, user])
            .output()
            .expect("failed to run cubby rm")
    }

    /// Shortcut for `cubby` with no arguments (list services).
    pub fn services(&self) -> Output {
        self.cmd().output().expect("failed to run cubby")
    }

    /// Shortcut for `cubby --json` (list services as JSON).
    pub fn services_json(&self) -> Output {
        self.cmd()
            .arg("--json")
            .output()
            .expect("failed to run cubby --json")
    }

    /// Shortcut for `cubby SERVICE` (list users of a service).
    pub fn users(&self, service: &str) -> Output {
        self.cmd()
            .arg(service)
            .output()
            .expect("failed to run cubby SERVICE")
    }
}
