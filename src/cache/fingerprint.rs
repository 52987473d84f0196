//! Content fingerprints of dependency manifests
//!
//! A fingerprint is a SHA-256 over file contents. Same `Gemfile` and
//! `Gemfile.lock` = same fingerprint = reusable gems.

use crate::error::{BundlerError, BundlerResult};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Computes a digest over an ordered list of files
#[async_trait]
pub trait ChecksumCalculator: Send + Sync {
    /// Digest the files at `paths`, in order. Any unreadable file is an error.
    async fn sum(&self, paths: &[PathBuf]) -> BundlerResult<String>;
}

/// SHA-256 calculator
///
/// A single file yields the hex digest of its contents. Several files yield
/// the hex digest of their concatenated per-file hex digests, so the result
/// depends on both content and order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Calculator;

impl Sha256Calculator {
    pub fn new() -> Self {
        Self
    }
}

/// Hash a file's contents using SHA-256, returning lowercase hex
async fn hash_file_contents(path: &Path) -> BundlerResult<String> {
    let contents = fs::read(path)
        .await
        .map_err(|e| BundlerError::io(format!("reading {}", path.display()), e))?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    Ok(hex::encode(hasher.finalize()))
}

#[async_trait]
impl ChecksumCalculator for Sha256Calculator {
    async fn sum(&self, paths: &[PathBuf]) -> BundlerResult<String> {
        let mut digests = Vec::with_capacity(paths.len());
        for path in paths {
            digests.push(hash_file_contents(path).await?);
        }

        if let [single] = digests.as_slice() {
            return Ok(single.clone());
        }

        let mut hasher = Sha256::new();
        for digest in &digests {
            hasher.update(digest.as_bytes());
        }
        Ok(hex::encode(hasher.finalize()))
    }
}
