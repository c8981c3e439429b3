use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Top-level configuration for the cmwatch agent.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Modem connection configuration.
    #[serde(default)]
    pub hub: HubConfig,

    /// How often to run a poll cycle. Default: 60s.
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Plugin instance identifying this modem in dispatched values.
    /// Default: "cm1".
    #[serde(default = "default_plugin_instance")]
    pub plugin_instance: String,

    /// Hostname used in dispatched value identifiers. Default: "localhost".
    /// COLLECTD_HOSTNAME overrides this when the collectd exec plugin sets it.
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Emit per-cycle diagnostics at debug level. Never affects extraction.
    /// Default: false.
    #[serde(default)]
    pub verbose: bool,

    /// Top-level keys present in the file but unknown to this version.
    /// Collected during load and reported as warnings, never fatal.
    #[serde(skip)]
    pub unknown_keys: Vec<String>,
}

/// Modem connection configuration.
#[derive(Debug, Deserialize)]
pub struct HubConfig {
    /// Modem HTTP endpoint (e.g., "http://192.168.100.1/").
    #[serde(default)]
    pub endpoint: String,

    /// Device hardware generation. Default: v3.
    #[serde(default)]
    pub generation: Generation,

    /// Request timeout. Default: 10s.
    #[serde(default = "default_hub_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

/// Device hardware generation; selects the extractor strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    /// Generation 1: HTML status pages.
    V1,
    /// Generation 3: OID walk endpoint.
    V3,
}

/// Top-level keys this version understands; anything else in the file is
/// reported, not rejected.
const KNOWN_KEYS: [&str; 5] = ["hub", "interval", "plugin_instance", "hostname", "verbose"];

fn default_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_plugin_instance() -> String {
    "cm1".to_string()
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_hub_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hub: HubConfig::default(),
            interval: default_interval(),
            plugin_instance: default_plugin_instance(),
            hostname: default_hostname(),
            verbose: false,
            unknown_keys: Vec::new(),
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            generation: Generation::default(),
            timeout: default_hub_timeout(),
        }
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self::V3
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;

        let mut cfg: Config = serde_yaml::from_str(&data)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        cfg.unknown_keys = unknown_top_level_keys(&data);
        cfg.validate()?;

        Ok(cfg)
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if self.hub.endpoint.is_empty() {
            bail!("hub.endpoint is required");
        }

        if self.interval.is_zero() {
            bail!("interval must be positive");
        }

        if self.plugin_instance.is_empty() {
            bail!("plugin_instance must not be empty");
        }

        Ok(())
    }
}

/// Keys in the raw document with no counterpart in [`Config`]. serde already
/// ignores them; this recovers their names so load can warn about each.
fn unknown_top_level_keys(data: &str) -> Vec<String> {
    let Ok(raw) = serde_yaml::from_str::<serde_yaml::Value>(data) else {
        return Vec::new();
    };
    let Some(mapping) = raw.as_mapping() else {
        return Vec::new();
    };

    mapping
        .keys()
        .filter_map(|key| key.as_str())
        .filter(|key| !KNOWN_KEYS.contains(key))
        .map(str::to_string)
        .collect()
}
