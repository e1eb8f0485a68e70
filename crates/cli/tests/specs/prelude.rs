//! Test helpers for the black-box CLI tests.
//!
//! Provides a small DSL for running the cm binary against temporary files.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// The stock Debian `/etc/updatedb.conf`, shortened.
pub const UPDATEDB_CONF: &str = "\
PRUNE_BIND_MOUNTS=\"yes\"
# PRUNENAMES=\".git .bzr .hg .svn\"
PRUNEPATHS=\"/tmp /var/spool /media\"
PRUNEFS=\"NFS nfs afs\"
";

/// Create a CLI builder for cm commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("cm"));
        cmd.args(&self.args);

        // Keep the parent environment from changing grammar, logging or color.
        for var in ["CM_GRAMMAR", "CM_LOG", "RUST_LOG", "COLOR"] {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");

        for (key, value) in self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert the process exit code.
    pub fn code(self, expected: i32) -> Self {
        assert_eq!(
            self.output.status.code(),
            Some(expected),
            "stderr: {}",
            self.stderr()
        );
        self
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }
}

// =============================================================================
// Files
// =============================================================================

/// A temporary directory holding one configuration file.
pub struct ConfFile {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl ConfFile {
    pub fn with(content: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updatedb.conf");
        std::fs::write(&path, content).unwrap();
        Self { dir, path }
    }

    pub fn updatedb() -> Self {
        Self::with(UPDATEDB_CONF)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap()
    }

    /// `cm <subcommand> <path>` followed by `rest`
    pub fn cm(&self, subcommand: &str, rest: &[&str]) -> CliBuilder {
        let path = self.path.to_string_lossy();
        cli().args(&[subcommand, &*path]).args(rest)
    }
}
