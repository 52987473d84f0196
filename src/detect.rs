//! Detect phase
//!
//! Passes for any app with a `Gemfile` and records which Bundler version
//! the build should install.

use crate::cnb::{BuildPlan, Provide, Require, PLAN_ENTRY, VERSION_METADATA_KEY};
use crate::config::ConfigManager;
use crate::error::{BundlerError, BundlerResult};
use crate::parse::{buildpack_yml, gemfile_lock, BUILDPACK_YML, GEMFILE, GEMFILE_LOCK};
use std::path::Path;
use tracing::{debug, info};

/// Resolve the Bundler version an app asks for.
///
/// Starts from `default`, then `Gemfile.lock` (`BUNDLED WITH`), then
/// `buildpack.yml`; the last non-empty value wins.
pub fn requested_version(app_dir: &Path, default: &str) -> BundlerResult<String> {
    let mut version = default.to_string();

    if let Some(locked) = gemfile_lock::parse_bundler_version(&app_dir.join(GEMFILE_LOCK))? {
        debug!("{} is BUNDLED WITH {}", GEMFILE_LOCK, locked);
        version = locked;
    }
    if let Some(pinned) = buildpack_yml::parse_bundler_version(&app_dir.join(BUILDPACK_YML))? {
        debug!("{} pins Bundler {}", BUILDPACK_YML, pinned);
        version = pinned;
    }

    Ok(version)
}

/// Build plan for Bundler `version`
pub fn build_plan(version: &str) -> BuildPlan {
    let mut metadata = toml::Table::new();
    metadata.insert(VERSION_METADATA_KEY.to_string(), version.into());

    BuildPlan {
        provides: vec![Provide {
            name: PLAN_ENTRY.to_string(),
        }],
        requires: vec![Require {
            name: PLAN_ENTRY.to_string(),
            version: Some(version.to_string()),
            metadata,
        }],
    }
}

/// Run detection for the app in `app_dir` and write the plan to `plan_path`.
///
/// Returns [`BundlerError::DetectFailed`] when the app has no `Gemfile`.
pub async fn detect(app_dir: &Path, buildpack_dir: &Path, plan_path: &Path) -> BundlerResult<BuildPlan> {
    if !app_dir.join(GEMFILE).is_file() {
        return Err(BundlerError::DetectFailed(app_dir.to_path_buf()));
    }

    let config = ConfigManager::new(buildpack_dir).load().await?;
    let version = requested_version(app_dir, &config.default_bundler_version)?;
    info!("Detected Bundler version {}", version);

    let plan = build_plan(&version);
    plan.write(plan_path).await?;
    Ok(plan)
}
