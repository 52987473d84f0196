//! Build plan (detect output) and buildpack plan (build input)

use crate::error::{BundlerError, BundlerResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Something this buildpack contributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provide {
    pub name: String,
}

/// Something this buildpack needs, with optional version and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Require {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub metadata: toml::Table,
}

/// Build plan written by detect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildPlan {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provides: Vec<Provide>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<Require>,
}

impl BuildPlan {
    /// Write the plan as TOML to `path`
    pub async fn write(&self, path: &Path) -> BundlerResult<()> {
        let content = toml::to_string(self)?;
        fs::write(path, content)
            .await
            .map_err(|e| BundlerError::io(format!("writing build plan {}", path.display()), e))
    }
}

/// One resolved entry of the buildpack plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "toml::Table::is_empty")]
    pub metadata: toml::Table,
}

impl PlanEntry {
    /// String metadata value for `key`, if present and a string
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(toml::Value::as_str)
    }
}

/// Buildpack plan read by build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildpackPlan {
    pub entries: Vec<PlanEntry>,
}

impl BuildpackPlan {
    /// Read the plan from `path`
    pub async fn read(path: &Path) -> BundlerResult<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| BundlerError::io(format!("reading buildpack plan {}", path.display()), e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Entries named `name`, in plan order
    pub fn entries_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PlanEntry> {
        self.entries.iter().filter(move |e| e.name == name)
    }
}
