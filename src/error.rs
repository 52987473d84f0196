//! Error types for the Bundler buildpack
//!
//! All modules use `BundlerResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for buildpack operations
pub type BundlerResult<T> = Result<T, BundlerError>;

/// All errors that can occur while detecting or building
#[derive(Error, Debug)]
pub enum BundlerError {
    // Detection
    #[error("No Gemfile found in {0}")]
    DetectFailed(PathBuf),

    // Configuration errors
    #[error("Buildpack descriptor not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Invalid buildpack.yml at {path}: {reason}")]
    BuildpackYml { path: PathBuf, reason: String },

    #[error("Failed to determine Bundler major version from '{version}': {reason}")]
    BundlerVersion { version: String, reason: String },

    // Environment errors
    #[error("RVM not found: rvm_path is not set")]
    RvmNotFound,

    #[error("Failed to obtain ruby version: {0}")]
    VersionResolution(String),

    // Layer lifecycle errors
    #[error("Invalid layer descriptor at {path}: {reason}")]
    LayerInvalid { path: PathBuf, reason: String },

    #[error("Installing Bundler {version} failed: {source}")]
    Install {
        version: String,
        #[source]
        source: Box<BundlerError>,
    },

    #[error("Configuring cached Bundler layer failed: {source}")]
    Configuration {
        #[source]
        source: Box<BundlerError>,
    },

    // IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed to start: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed: {command}, exit code: {code}\n{output}")]
    CommandExecution {
        command: String,
        code: i32,
        output: String,
    },

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl BundlerError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, code: i32, output: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            code,
            output: output.into(),
        }
    }

    /// Whether this error means the buildpack does not apply (CNB exit code 100)
    pub fn is_detect_failure(&self) -> bool {
        matches!(self, Self::DetectFailed(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::DetectFailed(_) => Some("Add a Gemfile to the application root"),
            Self::ConfigNotFound(_) => Some("Set CNB_BUILDPACK_DIR to the buildpack root"),
            Self::RvmNotFound | Self::VersionResolution(_) => {
                Some("Make sure the RVM buildpack runs before this one and installs a Ruby")
            }
            Self::BundlerVersion { .. } => {
                Some("Check default_bundler_version in buildpack.toml or BUNDLED WITH in Gemfile.lock")
            }
            _ => None,
        }
    }
}
