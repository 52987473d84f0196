//! CNB layer handling
//!
//! A layer is a directory `<layers>/<name>/` plus a descriptor
//! `<layers>/<name>.toml` carrying its types and metadata. The lifecycle
//! restores both between builds when the layer is marked `cache`.

pub mod metadata;

pub use metadata::BundlerLayerMetadata;

use crate::error::{BundlerError, BundlerResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the layer this buildpack contributes
pub const BUNDLER_LAYER: &str = "rvm-bundler";

/// When a layer is visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerTypes {
    pub build: bool,
    pub cache: bool,
    pub launch: bool,
}

impl LayerTypes {
    /// Visible at build and launch, restored across builds
    pub fn all() -> Self {
        Self {
            build: true,
            cache: true,
            launch: true,
        }
    }
}

/// On-disk shape of `<layers>/<name>.toml`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct LayerDescriptor {
    types: LayerTypes,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<BundlerLayerMetadata>,
}

/// Environment scope of a layer env file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvScope {
    /// `env.build/`
    Build,
    /// `env.launch/`
    Launch,
}

impl EnvScope {
    fn dir_name(&self) -> &'static str {
        match self {
            Self::Build => "env.build",
            Self::Launch => "env.launch",
        }
    }
}

/// A layer and its descriptor
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// Layer directory
    pub path: PathBuf,
    /// Layer types
    pub types: LayerTypes,
    /// Metadata from the previous build, if any
    pub metadata: Option<BundlerLayerMetadata>,
    descriptor_path: PathBuf,
}

impl Layer {
    /// Load layer `name` from `layers_dir`.
    ///
    /// A missing descriptor is a first build: no types, no metadata.
    pub async fn load(layers_dir: &Path, name: &str) -> BundlerResult<Self> {
        let path = layers_dir.join(name);
        let descriptor_path = layers_dir.join(format!("{}.toml", name));

        let descriptor = if descriptor_path.exists() {
            let content = fs::read_to_string(&descriptor_path).await.map_err(|e| {
                BundlerError::io(format!("reading {}", descriptor_path.display()), e)
            })?;
            toml::from_str::<LayerDescriptor>(&content).map_err(|e| {
                BundlerError::LayerInvalid {
                    path: descriptor_path.clone(),
                    reason: e.to_string(),
                }
            })?
        } else {
            debug!("No descriptor for layer {}, first build", name);
            LayerDescriptor::default()
        };

        Ok(Self {
            name: name.to_string(),
            path,
            types: descriptor.types,
            metadata: descriptor.metadata,
            descriptor_path,
        })
    }

    /// Descriptor file path
    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    /// Bundler user configuration file inside the layer
    pub fn config_path(&self) -> PathBuf {
        self.path.join("config")
    }

    /// Create the layer directory if needed
    pub async fn ensure_dir(&self) -> BundlerResult<()> {
        fs::create_dir_all(&self.path)
            .await
            .map_err(|e| BundlerError::io(format!("creating layer {}", self.path.display()), e))
    }

    /// Write the descriptor atomically (temp file + rename), so a crash
    /// mid-write leaves the previous descriptor intact.
    pub async fn save(&self) -> BundlerResult<()> {
        self.ensure_dir().await?;

        let descriptor = LayerDescriptor {
            types: self.types,
            metadata: self.metadata.clone(),
        };
        let content = toml::to_string_pretty(&descriptor)?;

        let tmp = self.descriptor_path.with_extension("toml.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| BundlerError::io(format!("writing {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.descriptor_path).await.map_err(|e| {
            BundlerError::io(
                format!("renaming {} into place", self.descriptor_path.display()),
                e,
            )
        })?;

        debug!("Saved layer descriptor {}", self.descriptor_path.display());
        Ok(())
    }

    /// Write an env file that sets `name` to `value` unless already set
    pub async fn set_env_default(
        &self,
        scope: EnvScope,
        name: &str,
        value: &str,
    ) -> BundlerResult<()> {
        let dir = self.path.join(scope.dir_name());
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| BundlerError::io(format!("creating {}", dir.display()), e))?;

        let file = dir.join(format!("{}.default", name));
        fs::write(&file, value)
            .await
            .map_err(|e| BundlerError::io(format!("writing {}", file.display()), e))
    }
}
