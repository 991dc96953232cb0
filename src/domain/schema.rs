//! Job schemas as assembled by a discovery pass.

use serde::{Deserialize, Serialize};

use crate::catalog::JobConfig;

use super::parameter::ParameterDefinition;

/// Execution settings carried over from the handler-level job configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSettings {
    /// Display name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the job fans out into batch child jobs
    #[serde(default)]
    pub is_batch: bool,
    /// Retry attempts requested for this job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    /// Labels shown on the control surface
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Target queue name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

impl From<&JobConfig> for JobSettings {
    fn from(config: &JobConfig) -> Self {
        Self {
            name: config.name.clone().filter(|n| !n.trim().is_empty()),
            is_batch: config.is_batch,
            retries: config.retries,
            labels: config.labels.clone(),
            queue: config.queue.clone(),
        }
    }
}

/// The discovered schema of one job type.
///
/// Created once per successfully resolved handler during a discovery pass
/// and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSchema {
    /// Job-type name, unique within a registry
    pub job_type: String,
    /// Qualified name of the handler class
    pub handler_class: String,
    /// Qualified name of the request type
    pub request_type: String,
    /// Parameter definitions, in declaration order
    pub parameters: Vec<ParameterDefinition>,
    /// Whether parameters are stored externally and referenced by id
    pub uses_external_parameters: bool,
    /// Name of the identifier attribute, present iff external
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_field_name: Option<String>,
    /// Execution settings from the handler annotation
    #[serde(default)]
    pub settings: JobSettings,
}

impl JobSchema {
    /// Look up one parameter by name
    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of all parameters, in declaration order
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }
}
