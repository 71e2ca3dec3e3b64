//! Update configuration
//!
//! The release channel and feed URL are fixed for the lifetime of the
//! process. They come from an optional YAML file with CLI overrides on top.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UpdateError};

/// Default release host
pub const DEFAULT_BASE_URL: &str = "https://get.site.dev";

/// Default location of the update configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/site/update.yaml";

/// Named update track with its own version feed and binary path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    Stable,
    Beta,
}

impl ReleaseChannel {
    /// Path segment used in feed and binary URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Beta => "beta",
        }
    }
}

impl Default for ReleaseChannel {
    fn default() -> Self {
        Self::Stable
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseChannel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stable" => Ok(Self::Stable),
            "beta" => Ok(Self::Beta),
            other => Err(format!(
                "unknown release channel '{}' (expected stable or beta)",
                other
            )),
        }
    }
}

/// Configuration for one update run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Base URL of the release host
    pub base_url: String,

    /// Release channel to track
    pub channel: ReleaseChannel,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            channel: ReleaseChannel::default(),
        }
    }
}

impl UpdateConfig {
    /// Load configuration from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| UpdateError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_yaml_ng::from_str(&contents).map_err(|e| UpdateError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the default config file if present, defaults otherwise
    pub fn load() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Override the release channel
    pub fn with_channel(mut self, channel: ReleaseChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Override the release host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_round_trips_through_from_str() {
        assert_eq!("stable".parse::<ReleaseChannel>(), Ok(ReleaseChannel::Stable));
        assert_eq!("BETA".parse::<ReleaseChannel>(), Ok(ReleaseChannel::Beta));
        assert!("nightly".parse::<ReleaseChannel>().is_err());
    }

    #[test]
    fn default_config_uses_stable_channel() {
        let config = UpdateConfig::default();
        assert_eq!(config.channel, ReleaseChannel::Stable);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn config_parses_from_yaml() {
        let config: UpdateConfig =
            serde_yaml_ng::from_str("base_url: https://example.com\nchannel: beta\n").unwrap();
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.channel, ReleaseChannel::Beta);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: UpdateConfig = serde_yaml_ng::from_str("channel: beta\n").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.channel, ReleaseChannel::Beta);
    }
}
