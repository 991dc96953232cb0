//! Class metadata and annotation values as supplied by the catalog.
//!
//! Annotations are modeled as plain tagged data so the discovery engine stays
//! agnostic of whatever annotation or attribute system produced them.

use serde::{Deserialize, Serialize};

use super::types::TypeRef;

/// One parameter descriptor.
///
/// Attached directly to an attribute it overrides that attribute's name,
/// default value, or kind. Nested inside a [`AnnotationValue::ParameterSet`]
/// it declares one externally stored parameter, and `type_name` becomes
/// mandatory (there is no declared attribute to fall back on).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name; falls back to the attribute name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Default value as raw text; presence makes the parameter optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Explicit type name, e.g. `"i64"`, `"MULTILINE"`, `"EnumSet<Color>"`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl ParameterSpec {
    /// Descriptor with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the explicit type name
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

/// Handler-level job configuration.
///
/// Everything is optional; an absent annotation behaves like the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Job-type name override; the handler's unqualified class name otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the handler fans out into batch child jobs
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

/// A single annotation value attached to a type or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "annotation", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    /// Per-attribute parameter descriptor
    Parameter(ParameterSpec),
    /// Descriptor list marking external parameter storage
    ParameterSet(Vec<ParameterSpec>),
    /// Handler-level job configuration
    JobConfig(JobConfig),
}

/// A declared attribute of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInfo {
    /// Attribute name
    pub name: String,
    /// Declared type
    pub declared_type: TypeRef,
    /// Annotations attached to this attribute
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationValue>,
}

impl AttributeInfo {
    /// New attribute with no annotations
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared_type,
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation
    pub fn with_annotation(mut self, annotation: AnnotationValue) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// First per-attribute parameter descriptor, if any
    pub fn parameter_spec(&self) -> Option<&ParameterSpec> {
        self.annotations.iter().find_map(|a| match a {
            AnnotationValue::Parameter(spec) => Some(spec),
            _ => None,
        })
    }

    /// First descriptor list, if any
    pub fn parameter_set(&self) -> Option<&[ParameterSpec]> {
        self.annotations.iter().find_map(|a| match a {
            AnnotationValue::ParameterSet(specs) => Some(specs.as_slice()),
            _ => None,
        })
    }
}

/// Metadata for one class, as materialized by the surrounding system.
///
/// The discovery engine only ever reads this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    /// Qualified type name, the catalog lookup key
    pub name: String,
    /// Declared superclass, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeRef>,
    /// Directly implemented interfaces, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
    /// Whether the type is a structural product type (record-like)
    #[serde(default)]
    pub is_record_like: bool,
    /// Declared attributes, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInfo>,
    /// Type-level annotations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_annotations: Vec<AnnotationValue>,
}

impl ClassMetadata {
    /// New metadata entry with nothing but a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
            is_record_like: false,
            attributes: Vec::new(),
            type_annotations: Vec::new(),
        }
    }

    /// Set the superclass
    pub fn with_superclass(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Mark the type as record-like
    pub fn record_like(mut self) -> Self {
        self.is_record_like = true;
        self
    }

    /// Add a declared attribute
    pub fn with_attribute(mut self, attribute: AttributeInfo) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a type-level annotation
    pub fn with_type_annotation(mut self, annotation: AnnotationValue) -> Self {
        self.type_annotations.push(annotation);
        self
    }

    /// Handler-level job configuration, if annotated
    pub fn job_config(&self) -> Option<&JobConfig> {
        self.type_annotations.iter().find_map(|a| match a {
            AnnotationValue::JobConfig(config) => Some(config),
            _ => None,
        })
    }

    /// Unqualified type name (last path segment)
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }
}

/// Strip module and package qualifiers from a type name.
pub fn simple_name(name: &str) -> &str {
    let tail = name.rsplit("::").next().unwrap_or(name);
    tail.rsplit('.').next().unwrap_or(tail)
}
