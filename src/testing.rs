//! Test doubles shared by unit tests

use crate::cache::ChecksumCalculator;
use crate::error::{BundlerError, BundlerResult};
use crate::exec::{CommandRunner, CommandSpec};
use crate::ruby::VersionResolver;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Records every command; optionally fails one of them
#[derive(Default)]
pub struct FakeRunner {
    stdout: String,
    fail_on: Option<String>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command succeeds and prints `stdout`
    pub fn with_stdout(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            ..Self::default()
        }
    }

    /// Commands whose rendering starts with `prefix` exit with status 1
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_on: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    /// Additionally fail commands starting with `prefix`
    pub fn fail_on(mut self, prefix: &str) -> Self {
        self.fail_on = Some(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, spec: &CommandSpec) -> BundlerResult<String> {
        self.calls.lock().unwrap().push(spec.clone());
        let command = spec.to_string();
        match &self.fail_on {
            Some(prefix) if command.starts_with(prefix.as_str()) => {
                Err(BundlerError::command_exec(command, 1, "fake failure"))
            }
            _ => Ok(self.stdout.clone()),
        }
    }

    fn runner_name(&self) -> &'static str {
        "fake"
    }
}

/// Returns a fixed version or a fixed error message
pub struct FakeResolver {
    result: Result<String, String>,
    calls: AtomicUsize,
}

impl FakeResolver {
    pub fn returning(version: &str) -> Self {
        Self {
            result: Ok(version.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionResolver for FakeResolver {
    async fn lookup(&self, _working_dir: &Path) -> BundlerResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map_err(BundlerError::VersionResolution)
    }
}

/// Returns a fixed checksum and records the paths it was asked to hash
pub struct FakeCalculator {
    checksum: String,
    received: Mutex<Vec<Vec<PathBuf>>>,
}

impl FakeCalculator {
    pub fn returning(checksum: &str) -> Self {
        Self {
            checksum: checksum.to_string(),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<Vec<PathBuf>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChecksumCalculator for FakeCalculator {
    async fn sum(&self, paths: &[PathBuf]) -> BundlerResult<String> {
        self.received.lock().unwrap().push(paths.to_vec());
        Ok(self.checksum.clone())
    }
}

/// Buildpack descriptor used by phase tests
pub const BUILDPACK_TOML: &str = r#"
api = "0.7"

[buildpack]
id = "com.avarteq.rvm-bundler"
name = "RVM Bundler Buildpack"
version = "0.3.0"

[metadata.configuration]
default_bundler_version = "2.1.4"
install_puma = false

[metadata.configuration.puma]
version = "4.3.5"
bind = "tcp://0.0.0.0:8080"
workers = "5"
threads = "5"
preload = true
"#;

/// Write [`BUILDPACK_TOML`] into `dir`
pub fn write_buildpack_toml(dir: &Path) {
    std::fs::write(dir.join(crate::config::DESCRIPTOR_FILE), BUILDPACK_TOML).unwrap();
}
