//! Layer reuse decision
//!
//! Decides whether the expensive install must run, from the metadata of the
//! previous build, the active Ruby version and a fingerprint of the
//! dependency manifests.

use crate::cache::fingerprint::ChecksumCalculator;
use crate::error::{BundlerError, BundlerResult};
use crate::layer::BundlerLayerMetadata;
use crate::parse::{GEMFILE, GEMFILE_LOCK};
use crate::ruby::VersionResolver;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Outcome of [`evaluate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallVerdict {
    /// Whether the install must run this build
    pub should_run: bool,
    /// Fingerprint of the manifests right now; empty without a lock file
    pub fingerprint: String,
    /// Ruby version tag right now
    pub ruby_version: String,
}

/// Decide whether the install must run.
///
/// Reinstall when the Ruby version changed or the manifests changed. A
/// missing prior Ruby version counts as unchanged; a missing prior
/// fingerprint never matches, so a first build always installs.
///
/// The resolver runs first and its error is returned as-is; the
/// fingerprint is only computed once the Ruby version is known.
pub async fn evaluate(
    prior: Option<&BundlerLayerMetadata>,
    working_dir: &Path,
    resolver: &dyn VersionResolver,
    calculator: &dyn ChecksumCalculator,
) -> BundlerResult<InstallVerdict> {
    let ruby_version = resolver.lookup(working_dir).await?;

    let prior_ruby = prior.and_then(|m| m.ruby_version.as_deref());
    let version_matches = prior_ruby.map_or(true, |v| v == ruby_version);

    let lock_path = working_dir.join(GEMFILE_LOCK);
    let fingerprint = match tokio::fs::metadata(&lock_path).await {
        Ok(_) => {
            calculator
                .sum(&[working_dir.join(GEMFILE), lock_path])
                .await?
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No {} yet, fingerprint left empty", GEMFILE_LOCK);
            String::new()
        }
        Err(e) => {
            return Err(BundlerError::io(
                format!("checking {}", lock_path.display()),
                e,
            ))
        }
    };

    let prior_sha = prior.and_then(|m| m.cache_sha.as_deref());
    let fingerprint_matches = prior_sha == Some(fingerprint.as_str());

    let should_run = !fingerprint_matches || !version_matches;
    debug!(
        "Reuse check: ruby {} (prior {:?}, match {}), fingerprint {:?} (prior {:?}, match {}) => run {}",
        ruby_version,
        prior_ruby,
        version_matches,
        fingerprint,
        prior_sha,
        fingerprint_matches,
        should_run
    );

    Ok(InstallVerdict {
        should_run,
        fingerprint,
        ruby_version,
    })
}
