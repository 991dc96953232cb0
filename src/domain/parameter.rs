//! Parameter kinds and definitions.

use serde::{Deserialize, Serialize};

/// The closed set of semantic parameter types the control surface understands.
///
/// Every classification decision resolves to exactly one of these values or
/// fails; there is no catch-all member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterKind {
    /// Single-line free text
    String,
    /// Multi-line free text, only ever selected via an explicit override
    Multiline,
    /// 32- or 64-bit signed integer
    Integer,
    /// Boolean flag
    Boolean,
    /// Calendar date without a time component
    Date,
    /// Date and time, seconds precision
    #[serde(rename = "DATETIME")]
    DateTime,
    /// Single choice from a user-defined enumeration
    Enum,
    /// Multiple choices from a user-defined enumeration
    MultiEnum,
}

impl ParameterKind {
    /// Whether this kind carries enum constants
    pub fn has_enum_values(&self) -> bool {
        matches!(self, Self::Enum | Self::MultiEnum)
    }
}

/// One parameter of a job, as presented to form rendering and validation.
///
/// Invariant: `required` is true exactly when `default_value` is absent; the
/// constructors maintain this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Parameter name, non-blank
    pub name: String,
    /// Semantic kind
    pub kind: ParameterKind,
    /// Whether a value must be supplied
    pub required: bool,
    /// Default value as raw text, present only for optional parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Declared constants, populated only for ENUM / MULTI_ENUM
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl ParameterDefinition {
    /// A required parameter with no default
    pub fn required(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default_value: None,
            enum_values: Vec::new(),
        }
    }

    /// An optional parameter carrying a default value
    pub fn with_default(name: impl Into<String>, kind: ParameterKind, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default_value: Some(default_value.into()),
            enum_values: Vec::new(),
        }
    }

    /// Attach enum constants
    pub fn with_enum_values(mut self, enum_values: Vec<String>) -> Self {
        self.enum_values = enum_values;
        self
    }
}
