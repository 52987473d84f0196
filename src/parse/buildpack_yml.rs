//! `buildpack.yml` parsing
//!
//! ```yaml
//! rvm_bundler:
//!   bundler_version: 2.1.4
//! ```

use crate::error::{BundlerError, BundlerResult};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

/// File name at the application root
pub const BUILDPACK_YML: &str = "buildpack.yml";

/// Top-level document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildpackYml {
    pub rvm_bundler: RvmBundlerSection,
}

/// `rvm_bundler:` section
///
/// The version is read as the scalar text, so `1.10` stays `1.10` rather
/// than going through a float.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RvmBundlerSection {
    pub bundler_version: Option<String>,
}

fn parse_str(content: &str, path: &Path) -> BundlerResult<BuildpackYml> {
    if content.trim().is_empty() {
        return Ok(BuildpackYml::default());
    }
    serde_yaml::from_str(content).map_err(|e| BundlerError::BuildpackYml {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse the Bundler version from a `buildpack.yml`.
///
/// A missing file yields `None`; an unreadable or malformed file is an error.
pub fn parse_bundler_version(path: &Path) -> BundlerResult<Option<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(BundlerError::io(format!("reading {}", path.display()), e)),
    };

    let version = parse_str(&content, path)?.rvm_bundler.bundler_version;
    Ok(version.filter(|v| !v.trim().is_empty()))
}
