//! Configuration for the ipsetctl binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ipset::{Ipset, IPV6, SUPPRESS_ERRORS};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute path to the ipset executable (searched on PATH when unset)
    pub binary: Option<PathBuf>,

    /// Pass `-6` to create/add/del/test
    pub ipv6: bool,

    /// Pass `-!` to create/add/del/test
    pub suppress_errors: bool,
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the config if the file exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref binary) = self.binary {
            if !binary.is_absolute() {
                anyhow::bail!("Invalid binary '{}': must be an absolute path", binary.display());
            }
        }
        Ok(())
    }

    /// Flag tokens implied by this config, in the order they are passed.
    pub fn default_opts(&self) -> Vec<&'static str> {
        let mut opts = Vec::new();
        if self.ipv6 {
            opts.push(IPV6);
        }
        if self.suppress_errors {
            opts.push(SUPPRESS_ERRORS);
        }
        opts
    }

    /// Build the ipset handle, searching PATH unless a binary is configured.
    pub fn handle(&self) -> Result<Ipset> {
        match self.binary {
            Some(ref path) => Ok(Ipset::with_path(path)),
            None => Ipset::new().context("ipset is required (install the ipset package)"),
        }
    }
}
