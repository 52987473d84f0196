//! Ruby version resolution
//!
//! The cache is keyed on the active Ruby's major.minor (or the JRuby
//! equivalent), so a patch upgrade keeps gems while a minor upgrade, which
//! changes the native extension ABI, invalidates them.

use crate::error::{BundlerError, BundlerResult};
use crate::exec::{CommandRunner, CommandSpec};
use async_trait::async_trait;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Looks up the normalized version tag of the active runtime
#[async_trait]
pub trait VersionResolver: Send + Sync {
    /// Resolve the version tag (e.g. `ruby-2.7`) for `working_dir`
    async fn lookup(&self, working_dir: &Path) -> BundlerResult<String>;
}

/// Patterns tried in order; the first capture wins
const VERSION_PATTERNS: &[&str] = &[
    r"(jruby-\d+\.\d+\.\d+).\d+",
    r"(jruby-\d+\.\d+)\.\d+",
    r"(jruby-head)",
    r"(ruby-\d+\.\d+)\.\d+",
    r"(ruby-head)",
];

fn version_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        VERSION_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("static regex"))
            .collect()
    })
}

/// Normalize `rvm current` output to a version tag
pub fn normalize(output: &str) -> Option<String> {
    version_patterns()
        .iter()
        .find_map(|re| re.captures(output))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolves the Ruby version through `rvm current`
pub struct RubyVersionResolver<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> RubyVersionResolver<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl VersionResolver for RubyVersionResolver<'_> {
    async fn lookup(&self, working_dir: &Path) -> BundlerResult<String> {
        let spec = CommandSpec::new("rvm", working_dir).arg("current");
        let output = self
            .runner
            .run(&spec)
            .await
            .map_err(|e| BundlerError::VersionResolution(e.to_string()))?;

        let version = normalize(&output).ok_or_else(|| {
            BundlerError::VersionResolution(format!(
                "no string with ruby version found in '{}'",
                output.trim()
            ))
        })?;

        debug!("Resolved Ruby version {} from '{}'", version, output.trim());
        Ok(version)
    }
}
