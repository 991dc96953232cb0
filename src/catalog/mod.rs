//! Class catalog abstraction and the in-memory implementation.
//!
//! The discovery engine never inspects live types; it reads an
//! already-materialized catalog of class metadata supplied by the
//! surrounding system. Keeping the catalog behind a trait lets the resolver
//! and extractor run against hand-built fixtures in tests.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod metadata;
pub mod types;

pub use metadata::{simple_name, AnnotationValue, AttributeInfo, ClassMetadata, JobConfig, ParameterSpec};
pub use types::{TypeKind, TypeRef};

/// Read-only lookup of class metadata by qualified name.
pub trait ClassCatalog {
    /// Metadata for a class, if the catalog knows it
    fn class(&self, name: &str) -> Option<&ClassMetadata>;

    /// All class names known to the catalog
    fn class_names(&self) -> Vec<&str>;

    /// Declared constant names of an enumeration type, in declaration order.
    /// Returns `None` when the name is not a known enum.
    fn enum_constants(&self, name: &str) -> Option<&[String]>;
}

/// Catalog snapshot held entirely in memory.
///
/// Deserializable from a JSON snapshot file, which is how the operator CLI
/// feeds a materialized catalog into a discovery pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    /// Class metadata keyed by qualified name
    #[serde(default)]
    classes: HashMap<String, ClassMetadata>,
    /// Enum constant names keyed by qualified enum name
    #[serde(default)]
    enums: HashMap<String, Vec<String>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog snapshot from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Load a catalog snapshot from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(content)?;
        Ok(catalog)
    }

    /// Add or replace a class entry
    pub fn add_class(&mut self, metadata: ClassMetadata) -> &mut Self {
        self.classes.insert(metadata.name.clone(), metadata);
        self
    }

    /// Add or replace an enum entry
    pub fn add_enum(&mut self, name: impl Into<String>, constants: Vec<String>) -> &mut Self {
        self.enums.insert(name.into(), constants);
        self
    }

    /// Number of classes in the catalog
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the catalog has no classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Check if a class is known
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }
}

impl ClassCatalog for InMemoryCatalog {
    fn class(&self, name: &str) -> Option<&ClassMetadata> {
        self.classes.get(name)
    }

    fn class_names(&self) -> Vec<&str> {
        // Sorted so discovery walks the catalog in a stable order
        let mut names: Vec<&str> = self.classes.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn enum_constants(&self, name: &str) -> Option<&[String]> {
        self.enums.get(name).map(|v| v.as_slice())
    }
}
