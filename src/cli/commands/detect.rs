//! Detect command - `bin/detect <platform> <plan>`

use crate::cli::DetectArgs;
use crate::error::BundlerResult;
use std::path::Path;
use tracing::debug;

/// Execute the detect command
pub async fn execute(args: DetectArgs, app_dir: &Path, buildpack_dir: &Path) -> BundlerResult<()> {
    debug!("Platform directory: {}", args.platform.display());
    crate::detect::detect(app_dir, buildpack_dir, &args.plan).await?;
    Ok(())
}
