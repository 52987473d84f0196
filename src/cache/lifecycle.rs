//! Layer lifecycle
//!
//! Applies an [`InstallVerdict`] to the Bundler layer: either a full
//! install followed by a metadata refresh, or a light reconfiguration of
//! the restored layer.

use crate::cache::decision::InstallVerdict;
use crate::error::{BundlerError, BundlerResult};
use crate::layer::{BundlerLayerMetadata, Layer};
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Work performed on the layer directory
#[async_trait]
pub trait LayerActions: Send + Sync {
    /// Full install into `layer_path`
    async fn install(&self, layer_path: &Path) -> BundlerResult<()>;

    /// Point the toolchain at an existing install in `layer_path`
    async fn configure(&self, layer_path: &Path) -> BundlerResult<()>;
}

/// What [`reconcile`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Install ran and the metadata was refreshed
    Installed,
    /// Restored layer reused as-is
    Reused,
}

/// Bring the layer in line with the verdict.
///
/// On install failure the descriptor is left untouched, so the next build
/// sees the same prior metadata and retries.
pub async fn reconcile(
    layer: &mut Layer,
    verdict: &InstallVerdict,
    bundler_version: &str,
    actions: &dyn LayerActions,
) -> BundlerResult<ReconcileOutcome> {
    if verdict.should_run {
        let built_at = Utc::now();
        let start = Instant::now();
        info!("Installing Bundler {} into {}", bundler_version, layer.path.display());

        actions
            .install(&layer.path)
            .await
            .map_err(|e| BundlerError::Install {
                version: bundler_version.to_string(),
                source: Box::new(e),
            })?;

        info!("Completed in {:.1}s", start.elapsed().as_secs_f64());

        layer.metadata = Some(BundlerLayerMetadata::new(
            bundler_version,
            built_at,
            &verdict.fingerprint,
            &verdict.ruby_version,
        ));
        layer.save().await?;
        return Ok(ReconcileOutcome::Installed);
    }

    info!("Reusing cached layer {}", layer.path.display());
    actions
        .configure(&layer.path)
        .await
        .map_err(|e| BundlerError::Configuration {
            source: Box::new(e),
        })?;

    layer.save().await?;
    debug!("Layer {} metadata kept", layer.name);
    Ok(ReconcileOutcome::Reused)
}
