//! Project manifest (mosaic.yaml) parsing.
//!
//! The manifest lists the plugin sources to load, in order, along with
//! loader settings.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MosaicError, Result};
use crate::plugin::{Environment, LoadOptions};

/// Plugin directory used when the manifest lists none.
pub const DEFAULT_PLUGIN_DIR: &str = "plugins";

/// Project manifest loaded from mosaic.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Plugin sources, loaded in order: files, directories or URLs.
    pub plugins: Vec<String>,

    /// Execution context. Detected when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,

    /// HTTP timeout for URL sources, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Patterns to exclude from directory scans.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

impl Manifest {
    /// Load manifest from a mosaic.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MosaicError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| MosaicError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check mosaic.yaml syntax".to_string()),
        })
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| MosaicError::Build {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Get effective plugin sources, defaulting to the plugins directory.
    pub fn effective_plugins(&self) -> Vec<String> {
        if self.plugins.is_empty() {
            vec![DEFAULT_PLUGIN_DIR.to_string()]
        } else {
            self.plugins.clone()
        }
    }

    /// Loader options described by this manifest.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            environment: self.environment.unwrap_or_default(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            excludes: self.excludes.clone(),
        }
    }
}
