//! Database configuration via `orbis.toml`
//!
//! On first start a commented default `orbis.toml` is written next to the
//! data. To change settings, edit the file and restart.

use std::path::Path;

use orbis_security::AccessMode;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Config file name placed in the database directory.
pub const CONFIG_FILE_NAME: &str = "orbis.toml";

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Keep a per-session first-level cache (default: true)
    #[serde(default = "default_true")]
    pub level1_enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            level1_enabled: true,
        }
    }
}

/// `[replication]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationConfig {
    /// Forward verbatim-replicated commands to the replicator (default: false)
    #[serde(default)]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Database configuration loaded from `orbis.toml`.
///
/// # Example
///
/// ```toml
/// access_mode = "read_write"
///
/// [cache]
/// level1_enabled = true
///
/// [replication]
/// enabled = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrbisConfig {
    /// `"read_write"` or `"read_only"`
    #[serde(default)]
    pub access_mode: AccessMode,
    /// First-level cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Replication settings
    #[serde(default)]
    pub replication: ReplicationConfig,
}

impl OrbisConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# OrbisDB configuration
#
# Access mode: "read_write" (default) or "read_only"
#   "read_only" denies every create, update and delete permission
access_mode = "read_write"

[cache]
# Per-session first-level record cache (default: true)
level1_enabled = true

[replication]
# Forward TRUNCATE RECORD and other verbatim commands to peers (default: false)
enabled = false
"#
    }

    /// Parse config text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed TOML or unknown settings.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            reason: format!("invalid orbis.toml: {}", e),
        })
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Config {
                reason: format!(
                    "failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config {
            reason: format!("failed to serialize config: {}", e),
        })?;
        std::fs::write(path, content).map_err(|e| Error::Config {
            reason: format!("failed to write config file '{}': {}", path.display(), e),
        })
    }
}
