//! Cloud Native Buildpacks file formats
//!
//! Only the pieces this buildpack reads or writes: the build plan emitted
//! by detect, the buildpack plan handed to build, and `launch.toml`.

pub mod launch;
pub mod plan;

pub use launch::{Launch, Process};
pub use plan::{BuildPlan, BuildpackPlan, PlanEntry, Provide, Require};

/// Exit code that tells the lifecycle this buildpack does not apply
pub const DETECT_FAIL_EXIT_CODE: u8 = 100;

/// Plan entry name provided and required by this buildpack
pub const PLAN_ENTRY: &str = "rvm-bundler";

/// Plan entry metadata key carrying the Bundler version
pub const VERSION_METADATA_KEY: &str = "rvm_bundler_version";
