//! `Gemfile.lock` inspection
//!
//! Only two facts are needed from the lock file: the Bundler version in the
//! trailing `BUNDLED WITH` section, and whether a given gem is locked.

use crate::error::{BundlerError, BundlerResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Lock file name at the application root
pub const GEMFILE_LOCK: &str = "Gemfile.lock";

/// Read a lock file, mapping "does not exist" to `None`
fn read_optional(path: &Path) -> BundlerResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(BundlerError::io(format!("reading {}", path.display()), e)),
    }
}

/// Extract the version following the `BUNDLED WITH` marker
pub fn bundled_with(content: &str) -> Option<String> {
    let mut lines = content.lines().map(str::trim);
    while let Some(line) = lines.next() {
        if line == "BUNDLED WITH" {
            return lines
                .next()
                .filter(|v| !v.is_empty())
                .map(ToString::to_string);
        }
    }
    None
}

/// Parse the Bundler version from the lock file at `path`.
///
/// Returns `None` if the file does not exist or carries no `BUNDLED WITH`
/// section.
pub fn parse_bundler_version(path: &Path) -> BundlerResult<Option<String>> {
    Ok(read_optional(path)?.as_deref().and_then(bundled_with))
}

/// Whether `content` locks the gem `name` (a `name (x.y.z)` spec line)
pub fn locks_gem(content: &str, name: &str) -> bool {
    let prefix = format!("{} (", name);
    content.lines().any(|l| l.trim().starts_with(&prefix))
}

/// Whether the lock file at `path` locks the gem `name`.
/// A missing lock file locks nothing.
pub fn lock_file_has_gem(path: &Path, name: &str) -> BundlerResult<bool> {
    Ok(read_optional(path)?
        .map(|c| locks_gem(&c, name))
        .unwrap_or(false))
}
