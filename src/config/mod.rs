//! Configuration management for the buildpack

pub mod schema;

pub use schema::{BuildpackDescriptor, BuildpackInfo, Config, PumaConfig};

use crate::error::{BundlerError, BundlerResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File name of the buildpack descriptor
pub const DESCRIPTOR_FILE: &str = "buildpack.toml";

/// Configuration manager
pub struct ConfigManager {
    descriptor_path: PathBuf,
}

impl ConfigManager {
    /// Create a config manager for the buildpack rooted at `buildpack_dir`
    pub fn new(buildpack_dir: &Path) -> Self {
        Self {
            descriptor_path: buildpack_dir.join(DESCRIPTOR_FILE),
        }
    }

    /// Load the whole descriptor. A missing file is an error: the descriptor
    /// ships with the buildpack, so its absence means a broken install.
    pub async fn load_descriptor(&self) -> BundlerResult<BuildpackDescriptor> {
        let path = &self.descriptor_path;
        if !path.exists() {
            return Err(BundlerError::ConfigNotFound(path.clone()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| BundlerError::io(format!("reading {}", path.display()), e))?;

        let descriptor: BuildpackDescriptor =
            toml::from_str(&content).map_err(|e| BundlerError::ConfigInvalid {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(descriptor)
    }

    /// Load only `[metadata.configuration]`
    pub async fn load(&self) -> BundlerResult<Config> {
        Ok(self.load_descriptor().await?.metadata.configuration)
    }
}
