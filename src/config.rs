//! Discovery configuration.
//!
//! Names the designated handler interface and request marker a catalog uses.
//! Defaults match the conventional interface names; a YAML file overrides
//! them for codebases with their own naming.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default name of the generic handler interface
pub const DEFAULT_HANDLER_INTERFACE: &str = "JobHandler";

/// Default name of the request marker interface
pub const DEFAULT_REQUEST_MARKER: &str = "JobRequest";

/// Settings for a discovery pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Generic interface whose type parameter binds the request type
    #[serde(default = "default_handler_interface")]
    pub handler_interface: String,
    /// Marker interface every request type must carry
    #[serde(default = "default_request_marker")]
    pub request_marker: String,
}

fn default_handler_interface() -> String {
    DEFAULT_HANDLER_INTERFACE.to_string()
}

fn default_request_marker() -> String {
    DEFAULT_REQUEST_MARKER.to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            handler_interface: default_handler_interface(),
            request_marker: default_request_marker(),
        }
    }
}

impl DiscoveryConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
