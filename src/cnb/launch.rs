//! `launch.toml`

use crate::error::{BundlerError, BundlerResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// File name of the launch descriptor inside the layers directory
pub const LAUNCH_FILE: &str = "launch.toml";

/// A process the image can start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "type")]
    pub process_type: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default)]
    pub direct: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,
}

impl Process {
    /// Shell process of `process_type` running `command`
    pub fn new(process_type: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            process_type: process_type.into(),
            command: command.into(),
            args: Vec::new(),
            direct: false,
            default: false,
        }
    }
}

/// Contents of `launch.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Launch {
    pub processes: Vec<Process>,
}

impl Launch {
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Write `<layers_dir>/launch.toml`
    pub async fn write(&self, layers_dir: &Path) -> BundlerResult<()> {
        let path = layers_dir.join(LAUNCH_FILE);
        let content = toml::to_string(self)?;
        fs::write(&path, content)
            .await
            .map_err(|e| BundlerError::io(format!("writing {}", path.display()), e))
    }
}
