//! Procfile scanning

use crate::error::{BundlerError, BundlerResult};
use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

/// File name at the application root
pub const PROCFILE: &str = "Procfile";

fn web_entry() -> &'static Regex {
    static WEB: OnceLock<Regex> = OnceLock::new();
    WEB.get_or_init(|| Regex::new(r"^web:.*$").expect("static regex"))
}

/// Whether Procfile content declares a `web` process
pub fn declares_web(content: &str) -> bool {
    content.lines().any(|l| web_entry().is_match(l.trim()))
}

/// Whether the Procfile at `path` declares a `web` process.
/// A missing Procfile declares nothing.
pub fn has_web_process(path: &Path) -> BundlerResult<bool> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(declares_web(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(BundlerError::io(format!("reading {}", path.display()), e)),
    }
}
