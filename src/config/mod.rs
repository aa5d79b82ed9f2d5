//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::link::LinkDefinition;
use crate::core::module::ModuleName;
use crate::definitions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable holding the public base URL of the reference site
pub const REFERENCE_BASE_URL_ENV: &str = "REFERENCE_BASE_URL";

/// Settings for the API reference pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Base URL used to resolve page metadata links
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ReferenceConfig {
    /// Read the base URL from `REFERENCE_BASE_URL`, if set
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(REFERENCE_BASE_URL_ENV)
                .ok()
                .filter(|url| !url.is_empty()),
        }
    }
}

/// Complete configuration for the link system
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Modules registered in this process
    #[serde(default)]
    pub modules: Vec<ModuleName>,

    /// Link definitions to compile at startup
    #[serde(default)]
    pub links: Vec<LinkDefinition>,

    #[serde(default)]
    pub reference: ReferenceConfig,
}

impl LinksConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read link config {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid link config {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Merge multiple configurations into one
    ///
    /// Modules are unioned in first-seen order. A link defined in several
    /// configurations keeps the last definition, at the position it was first
    /// seen. The last configuration with a base URL wins.
    ///
    /// A link defined twice within one configuration is a
    /// [`ConfigError::DuplicateService`].
    pub fn merge(configs: Vec<LinksConfig>) -> Result<Self, ConfigError> {
        let mut merged = LinksConfig::default();

        for config in configs {
            let mut seen = HashSet::new();
            if let Some(link) = config
                .links
                .iter()
                .map(|link| link.service_name)
                .find(|name| !seen.insert(*name))
            {
                return Err(ConfigError::DuplicateService { link });
            }

            for module in config.modules {
                if !merged.modules.contains(&module) {
                    merged.modules.push(module);
                }
            }

            for link in config.links {
                match merged
                    .links
                    .iter_mut()
                    .find(|existing| existing.service_name == link.service_name)
                {
                    Some(existing) => *existing = link,
                    None => merged.links.push(link),
                }
            }

            if config.reference.base_url.is_some() {
                merged.reference = config.reference;
            }
        }

        Ok(merged)
    }

    /// Every module and every built-in link definition
    pub fn default_config() -> Self {
        Self {
            modules: ModuleName::ALL.to_vec(),
            links: definitions::builtin().into_iter().cloned().collect(),
            reference: ReferenceConfig::default(),
        }
    }
}
