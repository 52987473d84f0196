//! Persisted metadata of the Bundler layer
//!
//! Stored under `[metadata]` in `<layers>/rvm-bundler.toml`. Decoding is
//! forward compatible: unknown keys are ignored and missing keys decode to
//! `None`, meaning "no prior value".

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What the last successful install left in the layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerLayerMetadata {
    /// Installed Bundler version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// When the layer was last (re)built, RFC 3339
    #[serde(
        alias = "builtAt",
        deserialize_with = "de_timestamp",
        serialize_with = "ser_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub built_at: Option<DateTime<Utc>>,

    /// Fingerprint of `Gemfile` + `Gemfile.lock` at build time, possibly empty
    #[serde(alias = "cacheFingerprint", skip_serializing_if = "Option::is_none")]
    pub cache_sha: Option<String>,

    /// Normalized Ruby version tag at build time
    #[serde(alias = "resolvedEnvVersion", skip_serializing_if = "Option::is_none")]
    pub ruby_version: Option<String>,
}

impl BundlerLayerMetadata {
    /// Metadata for a fresh install
    pub fn new(
        version: &str,
        built_at: DateTime<Utc>,
        cache_sha: &str,
        ruby_version: &str,
    ) -> Self {
        Self {
            version: Some(version.to_string()),
            built_at: Some(built_at),
            cache_sha: Some(cache_sha.to_string()),
            ruby_version: Some(ruby_version.to_string()),
        }
    }
}

fn ser_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Nanos, true)),
        None => serializer.serialize_none(),
    }
}

/// Accept RFC 3339 strings and native TOML datetimes; anything unparsable
/// is treated as absent.
fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = toml::Value::deserialize(deserializer)?;
    let text = match raw {
        toml::Value::String(s) => s,
        toml::Value::Datetime(dt) => dt.to_string(),
        _ => return Ok(None),
    };
    Ok(DateTime::parse_from_rfc3339(&text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc)))
}
