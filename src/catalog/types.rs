//! Type references as they appear in catalog metadata.

use serde::{Deserialize, Serialize};

/// Kind tag for a type reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A concrete class or record type
    #[default]
    Class,
    /// An interface type
    Interface,
    /// A language primitive (bool, i32, ...)
    Primitive,
    /// A generic instantiation carrying type arguments
    Parameterized,
}

/// A reference to a type: its name plus any generic type arguments.
///
/// Immutable value created while reading catalog metadata. Generic arguments
/// are themselves type references, so `HashSet<Color>` is represented as a
/// `Parameterized` ref named `HashSet` with one `Class` argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Type name, qualified the way the indexed codebase qualifies it
    pub name: String,
    /// Generic type arguments, empty for non-generic references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeRef>,
    /// Kind tag
    #[serde(default)]
    pub kind: TypeKind,
}

impl TypeRef {
    /// Reference to a plain class type
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            kind: TypeKind::Class,
        }
    }

    /// Reference to an interface type
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            kind: TypeKind::Interface,
        }
    }

    /// Reference to a primitive type
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            kind: TypeKind::Primitive,
        }
    }

    /// Reference to a generic instantiation with type arguments
    pub fn parameterized(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
            kind: TypeKind::Parameterized,
        }
    }

    /// Whether this reference carries at least one type argument
    pub fn is_parameterized(&self) -> bool {
        !self.args.is_empty()
    }

    /// First type argument, if any
    pub fn first_arg(&self) -> Option<&TypeRef> {
        self.args.first()
    }

    /// Render the reference the way it would appear in source
    pub fn display_name(&self) -> String {
        if self.args.is_empty() {
            self.name.clone()
        } else {
            let args: Vec<String> = self.args.iter().map(TypeRef::display_name).collect();
            format!("{}<{}>", self.name, args.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_ref() {
        let t = TypeRef::class("ReportRequest");
        assert_eq!(t.name, "ReportRequest");
        assert_eq!(t.kind, TypeKind::Class);
        assert!(!t.is_parameterized());
        assert!(t.first_arg().is_none());
    }

    #[test]
    fn test_parameterized_ref() {
        let t = TypeRef::parameterized("JobHandler", vec![TypeRef::class("ReportRequest")]);
        assert_eq!(t.kind, TypeKind::Parameterized);
        assert!(t.is_parameterized());
        assert_eq!(t.first_arg().unwrap().name, "ReportRequest");
    }

    #[test]
    fn test_display_name_nested() {
        let t = TypeRef::parameterized("HashSet", vec![TypeRef::class("Color")]);
        assert_eq!(t.display_name(), "HashSet<Color>");
        assert_eq!(TypeRef::primitive("bool").display_name(), "bool");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let t = TypeRef::parameterized("JobHandler", vec![TypeRef::class("ReportRequest")]);
        let json = serde_json::to_string(&t).unwrap();
        let restored: TypeRef = serde_json::from_str(&json).unwrap();
        assert_eq!(t, restored);
    }

    #[test]
    fn test_deserialization_defaults() {
        let t: TypeRef = serde_json::from_str(r#"{"name": "String"}"#).unwrap();
        assert_eq!(t.name, "String");
        assert!(t.args.is_empty());
        assert_eq!(t.kind, TypeKind::Class);
    }
}
