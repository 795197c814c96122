//! TOML configuration for the wharf CLI.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Backup root location.
    pub backup: BackupSection,
    /// Remote record discovery settings.
    pub discovery: DiscoverySection,
    /// External ipfs tool settings.
    pub ipfs: IpfsSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[backup]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackupSection {
    /// Backup root directory (manifest, CID list and objects live here).
    pub root: PathBuf,
}

impl Default for BackupSection {
    fn default() -> Self {
        let root = dirs::home_dir()
            .map(|h| h.join(".wharf"))
            .unwrap_or_else(|| PathBuf::from(".wharf"));
        Self { root }
    }
}

/// `[discovery]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Base URL of the record API. Required for `wharf discover`.
    pub base_url: String,
    /// Creator addresses to query when none are given on the command line.
    pub creators: Vec<String>,
}

/// `[ipfs]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IpfsSection {
    /// Name or path of the ipfs binary.
    pub binary: PathBuf,
}

impl Default for IpfsSection {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ipfs"),
        }
    }
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
