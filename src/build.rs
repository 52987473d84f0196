//! Build phase
//!
//! Installs Bundler and the app's gems into the `rvm-bundler` layer, or
//! reuses the layer restored from the previous build, then exports
//! `BUNDLE_USER_CONFIG` and the `web` process.

use crate::bundler::{self, stage_user_config, BundlerInstaller, BUNDLE_USER_CONFIG};
use crate::cache::{evaluate, reconcile, ChecksumCalculator, ReconcileOutcome};
use crate::cnb::{BuildpackPlan, Launch};
use crate::config::ConfigManager;
use crate::error::BundlerResult;
use crate::exec::CommandRunner;
use crate::layer::{EnvScope, Layer, LayerTypes, BUNDLER_LAYER};
use crate::puma;
use crate::ruby::RubyVersionResolver;
use std::path::PathBuf;
use tracing::info;

/// Inputs of one build invocation
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Application source directory (the working directory)
    pub app_dir: PathBuf,
    /// Layers directory owned by this buildpack
    pub layers_dir: PathBuf,
    /// Buildpack root holding `buildpack.toml`
    pub buildpack_dir: PathBuf,
    /// Buildpack plan file
    pub plan_path: PathBuf,
}

/// Run the build.
///
/// Commands go through `runner`; the reuse fingerprint through
/// `calculator`.
pub async fn build(
    ctx: &BuildContext,
    runner: &dyn CommandRunner,
    calculator: &dyn ChecksumCalculator,
) -> BundlerResult<ReconcileOutcome> {
    let descriptor = ConfigManager::new(&ctx.buildpack_dir)
        .load_descriptor()
        .await?;
    let identity = &descriptor.buildpack;
    info!("{} {}", identity.name, identity.version);

    let config = descriptor.metadata.configuration;
    let plan = BuildpackPlan::read(&ctx.plan_path).await?;
    let version = bundler::bundler_version(&plan, &config);
    info!("Bundler version: {}", version);

    let mut layer = Layer::load(&ctx.layers_dir, BUNDLER_LAYER).await?;
    layer.types = LayerTypes::all();

    let user_config = layer.config_path();
    let installer = BundlerInstaller::new(runner, &ctx.app_dir, &version, config, &user_config)?;

    let resolver = RubyVersionResolver::new(runner);
    let verdict = evaluate(layer.metadata.as_ref(), &ctx.app_dir, &resolver, calculator).await?;

    stage_user_config(&ctx.app_dir, &layer).await?;
    let outcome = reconcile(&mut layer, &verdict, &version, &installer).await?;

    let user_config = user_config.to_string_lossy();
    for scope in [EnvScope::Build, EnvScope::Launch] {
        layer
            .set_env_default(scope, BUNDLE_USER_CONFIG, &user_config)
            .await?;
    }

    let launch = Launch {
        processes: puma::web_process(&ctx.app_dir)?.into_iter().collect(),
    };
    if !launch.is_empty() {
        launch.write(&ctx.layers_dir).await?;
    }

    Ok(outcome)
}
