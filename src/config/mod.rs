//! Configuration loading and management

use crate::core::{AccessPolicy, LabdeskError, SortDirection};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

/// Per-collection overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Sort direction used when a request names none (default `desc`)
    #[serde(default)]
    pub default_order: Option<SortDirection>,

    /// Page size used when a request names none
    #[serde(default)]
    pub default_page_size: Option<usize>,

    /// Who may delete records (`public`, `authenticated`, `role:<name>`,
    /// `owner_or_role:<name>`); defaults to the owner or an admin
    #[serde(default)]
    pub delete_policy: Option<String>,
}

/// Settings of one collection after overrides are applied
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSettings {
    pub default_order: SortDirection,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub delete_policy: AccessPolicy,
}

/// Complete configuration of the portal server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Address the server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Page size used when neither request nor collection names one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Upper bound for any requested page size
    #[serde(default = "max_page_size")]
    pub max_page_size: usize,

    /// Fill the collections with demo records at startup
    #[serde(default)]
    pub seed_demo_data: bool,

    /// Overrides keyed by collection name (e.g. "board-posts")
    #[serde(default)]
    pub collections: HashMap<String, CollectionConfig>,
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn max_page_size() -> usize {
    MAX_PAGE_SIZE
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl PortalConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration used when no file is given
    pub fn default_config() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            seed_demo_data: false,
            collections: HashMap::new(),
        }
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), LabdeskError> {
        if self.max_page_size == 0 {
            return Err(LabdeskError::Config(
                "max_page_size must be at least 1".to_string(),
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(LabdeskError::Config(format!(
                "default_page_size must be between 1 and {}",
                self.max_page_size
            )));
        }
        for (name, collection) in &self.collections {
            if let Some(size) = collection.default_page_size
                && (size == 0 || size > self.max_page_size)
            {
                return Err(LabdeskError::Config(format!(
                    "collections.{}.default_page_size must be between 1 and {}",
                    name, self.max_page_size
                )));
            }
        }
        Ok(())
    }

    /// Resolve the settings of a collection
    pub fn collection(&self, name: &str) -> CollectionSettings {
        let overrides = self.collections.get(name).cloned().unwrap_or_default();

        CollectionSettings {
            default_order: overrides.default_order.unwrap_or_default(),
            default_page_size: overrides
                .default_page_size
                .unwrap_or(self.default_page_size),
            max_page_size: self.max_page_size,
            delete_policy: overrides
                .delete_policy
                .as_deref()
                .map(AccessPolicy::parse_policy)
                .unwrap_or_default(),
        }
    }
}
