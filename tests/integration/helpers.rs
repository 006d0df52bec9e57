//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};
use assert_cmd::Command;
use tempfile::TempDir;

/// Output of a CLI run.
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

/// An isolated environment: its own config file path inside a temp dir.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write the config file used by `run`.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// The binary, set up with this sandbox's config and colors off.
    pub fn command(&self) -> Command {
        let mut command =
            Command::cargo_bin("braille-reader").expect("braille-reader binary is built");
        command
            .env("BRAILLE_READER_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("BRAILLE_READER_LOG");
        command
    }

    /// Run the binary and capture its output.
    pub fn run(&self, args: &[&str]) -> CliOutput {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to execute braille-reader");

        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code().unwrap_or(-1),
        }
    }

    /// Write an executable shell script, e.g. a fake OCR engine.
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
        path
    }
}

/// Flags that make playback finish immediately.
pub const FAST: &[&str] = &["--plain", "--initial-delay-ms", "0", "--interval-ms", "1"];

/// `args` followed by [`FAST`].
pub fn fast(args: &[&str]) -> Vec<String> {
    args.iter().chain(FAST).map(|s| s.to_string()).collect()
}

/// Borrow a `Vec<String>` as `&[&str]`.
pub fn as_strs(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}
