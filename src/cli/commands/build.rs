//! Build command - `bin/build <layers> <platform> <plan>`

use crate::build::{build, BuildContext};
use crate::cache::{ReconcileOutcome, Sha256Calculator};
use crate::cli::BuildArgs;
use crate::error::BundlerResult;
use crate::exec::{CommandRunner, RvmShell};
use std::path::Path;
use tracing::{debug, info};

/// Execute the build command
pub async fn execute(args: BuildArgs, app_dir: &Path, buildpack_dir: &Path) -> BundlerResult<()> {
    debug!("Platform directory: {}", args.platform.display());
    let shell = RvmShell::from_env()?;
    debug!(
        "Using {} ({})",
        shell.runner_name(),
        shell.profile_script().display()
    );

    let ctx = BuildContext {
        app_dir: app_dir.to_path_buf(),
        layers_dir: args.layers,
        buildpack_dir: buildpack_dir.to_path_buf(),
        plan_path: args.plan,
    };

    match build(&ctx, &shell, &Sha256Calculator::new()).await? {
        ReconcileOutcome::Installed => info!("Bundler layer installed"),
        ReconcileOutcome::Reused => info!("Bundler layer reused"),
    }
    Ok(())
}
