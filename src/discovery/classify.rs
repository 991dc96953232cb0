//! Shared type-classification table.
//!
//! Maps declared types and descriptor type strings onto the closed
//! [`ParameterKind`] vocabulary. Both extraction modes classify through this
//! module; how an unclassifiable type is handled differs per mode and stays
//! with the caller.

use crate::catalog::{ClassCatalog, TypeRef};
use crate::domain::ParameterKind;

/// Explicit override token selecting multi-line text
pub const MULTILINE_TOKEN: &str = "MULTILINE";

/// Set container names whose single argument may be an enumeration
const SET_TYPES: &[&str] = &["HashSet", "BTreeSet", "EnumSet"];

/// Outcome of a successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// Resolved kind
    pub kind: ParameterKind,
    /// Enum constants, populated only for ENUM / MULTI_ENUM
    pub enum_values: Vec<String>,
}

impl Classified {
    fn plain(kind: ParameterKind) -> Self {
        Self {
            kind,
            enum_values: Vec::new(),
        }
    }
}

fn builtin_kind(name: &str) -> Option<ParameterKind> {
    match name {
        "String" | "str" => Some(ParameterKind::String),
        "i32" | "i64" | "int" | "long" => Some(ParameterKind::Integer),
        "bool" | "boolean" => Some(ParameterKind::Boolean),
        "NaiveDate" | "Date" => Some(ParameterKind::Date),
        "NaiveDateTime" | "DateTime" => Some(ParameterKind::DateTime),
        _ => None,
    }
}

fn is_set_type(name: &str) -> bool {
    SET_TYPES.contains(&name)
}

fn enum_classified<C: ClassCatalog + ?Sized>(
    catalog: &C,
    enum_name: &str,
    kind: ParameterKind,
) -> Option<Classified> {
    let constants = catalog.enum_constants(enum_name)?;
    Some(Classified {
        kind,
        enum_values: constants.to_vec(),
    })
}

/// Classify a declared type reference.
///
/// Returns `None` when the type falls outside the supported vocabulary.
pub fn classify_type_ref<C: ClassCatalog + ?Sized>(catalog: &C, ty: &TypeRef) -> Option<Classified> {
    if is_set_type(&ty.name) {
        let element = ty.first_arg()?;
        return enum_classified(catalog, &element.name, ParameterKind::MultiEnum);
    }

    if let Some(kind) = builtin_kind(&ty.name) {
        return Some(Classified::plain(kind));
    }

    enum_classified(catalog, &ty.name, ParameterKind::Enum)
}

/// Classify a descriptor type string, e.g. `"i64"`, `"MULTILINE"`,
/// `"EnumSet<jobs::Color>"`.
///
/// Returns `None` when the string names a type outside the supported
/// vocabulary or a set of something that is not a catalog enum.
pub fn classify_type_name<C: ClassCatalog + ?Sized>(catalog: &C, type_name: &str) -> Option<Classified> {
    let type_name = type_name.trim();

    if type_name == MULTILINE_TOKEN {
        return Some(Classified::plain(ParameterKind::Multiline));
    }

    if let Some(kind) = builtin_kind(type_name) {
        return Some(Classified::plain(kind));
    }

    if let Some((container, element)) = split_set_syntax(type_name) {
        if is_set_type(container) {
            return enum_classified(catalog, element, ParameterKind::MultiEnum);
        }
        return None;
    }

    enum_classified(catalog, type_name, ParameterKind::Enum)
}

/// Split `"Container<Element>"` into its parts.
fn split_set_syntax(type_name: &str) -> Option<(&str, &str)> {
    let open = type_name.find('<')?;
    let close = type_name.strip_suffix('>')?;
    Some((&type_name[..open], close[open + 1..].trim()))
}
