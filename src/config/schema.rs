//! Configuration schema for the buildpack
//!
//! Configuration lives in the `[metadata.configuration]` table of the
//! buildpack's own `buildpack.toml`.

use serde::{Deserialize, Serialize};

/// Root of `buildpack.toml`, reduced to the tables this buildpack reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildpackDescriptor {
    /// `[buildpack]` identity table
    pub buildpack: BuildpackInfo,

    /// `[metadata]` table
    pub metadata: DescriptorMetadata,
}

/// Buildpack identity, used for log titles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildpackInfo {
    pub id: String,
    pub name: String,
    pub version: String,
}

/// `[metadata]` table of `buildpack.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorMetadata {
    pub configuration: Config,
}

/// Buildpack configuration from `[metadata.configuration]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bundler version installed when neither the plan nor the app pins one
    pub default_bundler_version: String,

    /// Install Puma and write a default `config/puma.rb`
    pub install_puma: bool,

    /// Puma settings
    pub puma: PumaConfig,
}

/// Puma settings used for the generated `config/puma.rb`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PumaConfig {
    /// Puma gem version appended to the Gemfile
    pub version: String,

    /// Bind URI, e.g. `tcp://0.0.0.0:8080`
    pub bind: String,

    /// Worker count
    pub workers: String,

    /// Min and max thread count
    pub threads: String,

    /// Emit `preload_app!`
    pub preload: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_deserializes_empty() {
        let descriptor: BuildpackDescriptor = toml::from_str("").unwrap();
        assert_eq!(descriptor.metadata.configuration, Config::default());
    }

    #[test]
    fn descriptor_without_configuration_table() {
        let descriptor: BuildpackDescriptor = toml::from_str("[buildpack]").unwrap();
        assert_eq!(descriptor.metadata.configuration, Config::default());
        assert!(descriptor.buildpack.name.is_empty());
    }

    #[test]
    fn descriptor_deserializes_partial() {
        let toml = r#"
            [metadata.configuration]
            default_bundler_version = "2.1.4"

            [metadata.configuration.puma]
            bind = "tcp://0.0.0.0:9292"
        "#;
        let descriptor: BuildpackDescriptor = toml::from_str(toml).unwrap();
        let config = descriptor.metadata.configuration;
        assert_eq!(config.default_bundler_version, "2.1.4");
        assert!(!config.install_puma);
        assert_eq!(config.puma.bind, "tcp://0.0.0.0:9292");
        assert!(config.puma.version.is_empty());
    }
}
