//! Local Bundler configuration staging
//!
//! The app's `.bundle/config` is copied into the layer, where
//! `BUNDLE_USER_CONFIG` points Bundler. A pristine copy is kept in
//! `.bundle/config.bak` so that settings written by one build (such as
//! `path`) never leak into the next.

use crate::error::{BundlerError, BundlerResult};
use crate::layer::Layer;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

async fn copy(from: &Path, to: &Path) -> BundlerResult<()> {
    fs::copy(from, to)
        .await
        .map(|_| ())
        .map_err(|e| BundlerError::io(format!("copying {} to {}", from.display(), to.display()), e))
}

/// Stage the app's local Bundler config into the layer.
///
/// Removes any config left in the layer by a previous build. When the app
/// has `.bundle/config`, restores it from its backup (if any), copies it to
/// the layer and refreshes the backup.
pub async fn stage_user_config(app_dir: &Path, layer: &Layer) -> BundlerResult<()> {
    let global = layer.config_path();
    match fs::remove_file(&global).await {
        Ok(()) => debug!("Removed stale {}", global.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(BundlerError::io(format!("removing {}", global.display()), e)),
    }

    let local = app_dir.join(".bundle").join("config");
    if !local.exists() {
        return Ok(());
    }

    layer.ensure_dir().await?;

    let backup = app_dir.join(".bundle").join("config.bak");
    if backup.exists() {
        copy(&backup, &local).await?;
    }
    copy(&local, &global).await?;
    copy(&local, &backup).await?;

    debug!("Staged {} as {}", local.display(), global.display());
    Ok(())
}
