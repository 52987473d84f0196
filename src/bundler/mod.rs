//! Bundler installation
//!
//! Version selection, the concrete [`LayerActions`](crate::cache::LayerActions)
//! implementation, and staging of the app's local Bundler configuration.

pub mod installer;
pub mod user_config;

pub use installer::BundlerInstaller;
pub use user_config::stage_user_config;

use crate::cnb::{BuildpackPlan, PLAN_ENTRY, VERSION_METADATA_KEY};
use crate::config::Config;
use crate::error::{BundlerError, BundlerResult};

/// Environment variable pointing Bundler at the layer's user config
pub const BUNDLE_USER_CONFIG: &str = "BUNDLE_USER_CONFIG";

/// RubyGems version pinned when installing Bundler 1.x
pub const RUBYGEMS_FOR_BUNDLER_1: &str = "3.0.8";

/// Bundler version to install for this build.
///
/// The last `rvm-bundler` plan entry wins: its `rvm_bundler_version`
/// metadata first, then its version. Falls back to the configured default.
pub fn bundler_version(plan: &BuildpackPlan, config: &Config) -> String {
    plan.entries_named(PLAN_ENTRY)
        .filter_map(|entry| {
            entry
                .metadata_str(VERSION_METADATA_KEY)
                .or(entry.version.as_deref())
                .filter(|v| !v.is_empty())
        })
        .last()
        .map(ToString::to_string)
        .unwrap_or_else(|| config.default_bundler_version.clone())
}

/// Leading integer of a version string, e.g. `2` for `2.1.4`
pub fn major_version(version: &str) -> BundlerResult<u32> {
    let digits: String = version
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return Err(BundlerError::BundlerVersion {
            version: version.to_string(),
            reason: "version does not start with a number".into(),
        });
    }

    digits.parse().map_err(|e: std::num::ParseIntError| BundlerError::BundlerVersion {
        version: version.to_string(),
        reason: e.to_string(),
    })
}
