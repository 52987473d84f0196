//! Parsers for application files
//!
//! Small, read-only readers for `Gemfile.lock`, `buildpack.yml` and
//! `Procfile`. Each treats a missing file as "nothing declared".

pub mod buildpack_yml;
pub mod gemfile_lock;
pub mod procfile;

/// Dependency manifest file name at the application root
pub const GEMFILE: &str = "Gemfile";

pub use buildpack_yml::BUILDPACK_YML;
pub use gemfile_lock::GEMFILE_LOCK;
pub use procfile::PROCFILE;
