//! Parameter schema extraction from resolved request types.
//!
//! A request type declares its parameters in one of two ways: inline, one
//! parameter per declared attribute, or externally, through a descriptor
//! list attached to a single string identifier attribute. External
//! descriptors have no compiled attribute to fall back on, so their
//! validation is strict where inline extraction degrades gracefully.

use log::{debug, warn};

use crate::catalog::{AttributeInfo, ClassCatalog, ClassMetadata, ParameterSpec};
use crate::discovery::classify::{classify_type_name, classify_type_ref, Classified};
use crate::domain::{ParameterDefinition, ParameterKind};
use crate::error::{DiscoveryError, Result};

/// Result of analyzing one request type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedParameters {
    /// Parameter definitions, in declaration order
    pub parameters: Vec<ParameterDefinition>,
    /// Whether the type uses external parameter storage
    pub uses_external_parameters: bool,
    /// Name of the identifier attribute, present iff external
    pub external_field_name: Option<String>,
}

/// Extracts parameter schemas from request-type metadata.
pub struct ParameterSchemaExtractor<'a, C: ClassCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: ClassCatalog + ?Sized> ParameterSchemaExtractor<'a, C> {
    /// New extractor over the given catalog
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Produce the parameter schema for one request type.
    pub fn extract(&self, request: &ClassMetadata) -> Result<AnalyzedParameters> {
        let mut set_attributes = request
            .attributes
            .iter()
            .filter_map(|attr| attr.parameter_set().map(|specs| (attr, specs)));

        let first = set_attributes.next();
        if let (Some((first, _)), Some((second, _))) = (first, set_attributes.next()) {
            return Err(DiscoveryError::MultipleExternalSchemas {
                request_type: request.name.clone(),
                first: first.name.clone(),
                second: second.name.clone(),
            });
        }

        match first {
            Some((attribute, specs)) => self.extract_external(request, attribute, specs),
            None => self.extract_inline(request),
        }
    }

    /// External mode: the schema lives entirely in the descriptor list.
    fn extract_external(
        &self,
        request: &ClassMetadata,
        attribute: &AttributeInfo,
        specs: &[ParameterSpec],
    ) -> Result<AnalyzedParameters> {
        // The attribute itself only carries the parameter-set identifier
        if !matches!(attribute.declared_type.name.as_str(), "String" | "str") {
            return Err(DiscoveryError::InvalidExternalFieldType {
                request_type: request.name.clone(),
                attribute: attribute.name.clone(),
                found: attribute.declared_type.display_name(),
            });
        }

        if specs.is_empty() {
            return Err(DiscoveryError::EmptyDescriptorList {
                request_type: request.name.clone(),
                attribute: attribute.name.clone(),
            });
        }

        for (position, spec) in specs.iter().enumerate() {
            if is_blank(spec.name.as_deref()) {
                return Err(DiscoveryError::MissingName {
                    request_type: request.name.clone(),
                    position,
                });
            }
        }

        for spec in specs {
            if is_blank(spec.type_name.as_deref()) {
                return Err(DiscoveryError::MissingType {
                    request_type: request.name.clone(),
                    parameter: spec.name.clone().unwrap_or_default(),
                });
            }
        }

        let mut parameters = Vec::with_capacity(specs.len());
        for spec in specs {
            parameters.push(self.definition_from_descriptor(request, spec)?);
        }

        debug!(
            "extracted {} external parameters from attribute '{}' of {}",
            parameters.len(),
            attribute.name,
            request.name
        );

        Ok(AnalyzedParameters {
            parameters,
            uses_external_parameters: true,
            external_field_name: Some(attribute.name.clone()),
        })
    }

    /// Build one definition from a fully validated external descriptor.
    fn definition_from_descriptor(
        &self,
        request: &ClassMetadata,
        spec: &ParameterSpec,
    ) -> Result<ParameterDefinition> {
        let name = spec.name.clone().expect("descriptor names were validated");
        let type_name = spec.type_name.as_deref().expect("descriptor types were validated");

        // No compiled attribute backs an external descriptor, so an
        // unsupported type cannot degrade to anything useful
        let Some(classified) = classify_type_name(self.catalog, type_name) else {
            return Err(DiscoveryError::UnresolvableType {
                request_type: request.name.clone(),
                parameter: name,
                type_name: type_name.to_string(),
            });
        };

        Ok(build_definition(name, classified, spec.default_value.clone()))
    }

    /// Inline mode: one parameter per declared attribute.
    fn extract_inline(&self, request: &ClassMetadata) -> Result<AnalyzedParameters> {
        let parameters = request
            .attributes
            .iter()
            .map(|attribute| self.definition_from_attribute(request, attribute))
            .collect();

        debug!(
            "extracted inline parameters from {} attributes of {}",
            request.attributes.len(),
            request.name
        );

        Ok(AnalyzedParameters {
            parameters,
            uses_external_parameters: false,
            external_field_name: None,
        })
    }

    fn definition_from_attribute(
        &self,
        request: &ClassMetadata,
        attribute: &AttributeInfo,
    ) -> ParameterDefinition {
        let spec = attribute.parameter_spec();

        let name = spec
            .and_then(|s| s.name.clone())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| attribute.name.clone());

        let default_value = spec.and_then(|s| s.default_value.clone());

        let explicit_type = spec.and_then(|s| s.type_name.as_deref()).filter(|t| !t.trim().is_empty());
        let classified = match explicit_type {
            Some(type_name) => classify_type_name(self.catalog, type_name).unwrap_or_else(|| {
                warn!(
                    "attribute '{}' of {} requests unsupported type '{}', treating as STRING",
                    attribute.name, request.name, type_name
                );
                Classified {
                    kind: ParameterKind::String,
                    enum_values: Vec::new(),
                }
            }),
            None => classify_type_ref(self.catalog, &attribute.declared_type).unwrap_or_else(|| {
                // The declared attribute is structurally present, so a text
                // rendering of its value is always usable
                warn!(
                    "attribute '{}' of {} has unclassifiable type '{}', treating as STRING",
                    attribute.name,
                    request.name,
                    attribute.declared_type.display_name()
                );
                Classified {
                    kind: ParameterKind::String,
                    enum_values: Vec::new(),
                }
            }),
        };

        build_definition(name, classified, default_value)
    }
}

fn build_definition(
    name: String,
    classified: Classified,
    default_value: Option<String>,
) -> ParameterDefinition {
    let definition = match default_value {
        Some(value) => ParameterDefinition::with_default(name, classified.kind, value),
        None => ParameterDefinition::required(name, classified.kind),
    };
    definition.with_enum_values(classified.enum_values)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AnnotationValue, InMemoryCatalog, TypeRef};

    fn catalog_with_color() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_enum(
            "jobs::Color",
            vec!["RED".to_string(), "GREEN".to_string(), "BLUE".to_string()],
        );
        catalog
    }

    fn attr(name: &str, ty: TypeRef) -> AttributeInfo {
        AttributeInfo::new(name, ty)
    }

    fn set_annotation(specs: Vec<ParameterSpec>) -> AnnotationValue {
        AnnotationValue::ParameterSet(specs)
    }

    #[test]
    fn test_inline_plain_attributes() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::ReportRequest")
            .record_like()
            .with_attribute(attr("name", TypeRef::class("String")))
            .with_attribute(attr("count", TypeRef::primitive("i32")));

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();

        assert!(!analyzed.uses_external_parameters);
        assert!(analyzed.external_field_name.is_none());
        assert_eq!(analyzed.parameters.len(), 2);

        let name = analyzed.parameters.iter().find(|p| p.name == "name").unwrap();
        assert_eq!(name.kind, ParameterKind::String);
        assert!(name.required);
        assert!(name.default_value.is_none());

        let count = analyzed.parameters.iter().find(|p| p.name == "count").unwrap();
        assert_eq!(count.kind, ParameterKind::Integer);
        assert!(count.required);
        assert!(count.default_value.is_none());
    }

    #[test]
    fn test_inline_name_and_default_overrides() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::DemoRequest")
            .record_like()
            .with_attribute(
                attr("first", TypeRef::class("String")).with_annotation(AnnotationValue::Parameter(
                    ParameterSpec::named("Custom Name").with_default("default value"),
                )),
            )
            .with_attribute(
                attr("second", TypeRef::class("String")).with_annotation(AnnotationValue::Parameter(
                    ParameterSpec::named("Another Custom Name"),
                )),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();

        let first = &analyzed.parameters[0];
        assert_eq!(first.name, "Custom Name");
        assert!(!first.required);
        assert_eq!(first.default_value.as_deref(), Some("default value"));

        let second = &analyzed.parameters[1];
        assert_eq!(second.name, "Another Custom Name");
        assert!(second.required);
        assert!(second.default_value.is_none());
    }

    #[test]
    fn test_inline_multiline_override() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::NotesRequest")
            .record_like()
            .with_attribute(
                attr("notes", TypeRef::class("String")).with_annotation(AnnotationValue::Parameter(
                    ParameterSpec::default().with_type("MULTILINE"),
                )),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();
        assert_eq!(analyzed.parameters[0].kind, ParameterKind::Multiline);
        assert_eq!(analyzed.parameters[0].name, "notes");
    }

    #[test]
    fn test_inline_enum_and_multi_enum() {
        let catalog = catalog_with_color();
        let request = ClassMetadata::new("jobs::PaintRequest")
            .record_like()
            .with_attribute(attr("color", TypeRef::class("jobs::Color")))
            .with_attribute(attr(
                "palette",
                TypeRef::parameterized("HashSet", vec![TypeRef::class("jobs::Color")]),
            ));

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();

        let color = &analyzed.parameters[0];
        assert_eq!(color.kind, ParameterKind::Enum);
        assert_eq!(color.enum_values, vec!["RED", "GREEN", "BLUE"]);

        let palette = &analyzed.parameters[1];
        assert_eq!(palette.kind, ParameterKind::MultiEnum);
        assert_eq!(palette.enum_values, color.enum_values);
    }

    #[test]
    fn test_inline_unknown_type_falls_back_to_string() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::OddRequest")
            .record_like()
            .with_attribute(attr("blob", TypeRef::class("jobs::Blob")));

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();
        assert_eq!(analyzed.parameters[0].kind, ParameterKind::String);
        assert!(analyzed.parameters[0].required);
    }

    #[test]
    fn test_inline_unknown_override_token_falls_back_to_string() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::OddRequest")
            .record_like()
            .with_attribute(
                attr("field", TypeRef::class("String")).with_annotation(AnnotationValue::Parameter(
                    ParameterSpec::default().with_type("jobs::Mystery"),
                )),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();
        assert_eq!(analyzed.parameters[0].kind, ParameterKind::String);
    }

    #[test]
    fn test_inline_empty_request_has_no_parameters() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::EmptyRequest").record_like();

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();
        assert!(analyzed.parameters.is_empty());
        assert!(!analyzed.uses_external_parameters);
    }

    #[test]
    fn test_external_mode_extraction() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::ExternalRequest")
            .record_like()
            .with_attribute(
                attr("parameters", TypeRef::class("String")).with_annotation(set_annotation(vec![
                    ParameterSpec::named("externalParam1").with_type("String"),
                    ParameterSpec::named("externalParam2").with_type("i32").with_default("42"),
                ])),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();

        assert!(analyzed.uses_external_parameters);
        assert_eq!(analyzed.external_field_name.as_deref(), Some("parameters"));
        assert_eq!(analyzed.parameters.len(), 2);

        let first = &analyzed.parameters[0];
        assert_eq!(first.name, "externalParam1");
        assert_eq!(first.kind, ParameterKind::String);
        assert!(first.required);

        let second = &analyzed.parameters[1];
        assert_eq!(second.name, "externalParam2");
        assert_eq!(second.kind, ParameterKind::Integer);
        assert!(!second.required);
        assert_eq!(second.default_value.as_deref(), Some("42"));
    }

    #[test]
    fn test_external_enum_descriptor() {
        let catalog = catalog_with_color();
        let request = ClassMetadata::new("jobs::ExternalRequest")
            .record_like()
            .with_attribute(
                attr("parameters", TypeRef::class("String")).with_annotation(set_annotation(vec![
                    ParameterSpec::named("color")
                        .with_type("jobs::Color")
                        .with_default("RED"),
                    ParameterSpec::named("palette").with_type("EnumSet<jobs::Color>"),
                ])),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let analyzed = extractor.extract(&request).unwrap();

        assert_eq!(analyzed.parameters[0].kind, ParameterKind::Enum);
        assert_eq!(analyzed.parameters[0].enum_values, vec!["RED", "GREEN", "BLUE"]);
        assert_eq!(analyzed.parameters[1].kind, ParameterKind::MultiEnum);
        assert_eq!(analyzed.parameters[1].enum_values, vec!["RED", "GREEN", "BLUE"]);
    }

    #[test]
    fn test_external_invalid_field_type() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::BadRequest")
            .record_like()
            .with_attribute(
                attr("parameters", TypeRef::primitive("i32")).with_annotation(set_annotation(vec![
                    ParameterSpec::named("p1").with_type("String"),
                ])),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::InvalidExternalFieldType { ref attribute, .. } if attribute == "parameters"
        ));
    }

    #[test]
    fn test_external_empty_descriptor_list() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::BadRequest")
            .record_like()
            .with_attribute(attr("parameters", TypeRef::class("String")).with_annotation(set_annotation(vec![])));

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(err, DiscoveryError::EmptyDescriptorList { .. }));
    }

    #[test]
    fn test_external_missing_name() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::BadRequest")
            .record_like()
            .with_attribute(
                attr("parameters", TypeRef::class("String")).with_annotation(set_annotation(vec![
                    ParameterSpec::named("ok").with_type("String"),
                    ParameterSpec::default().with_type("String"),
                ])),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(err, DiscoveryError::MissingName { position: 1, .. }));
    }

    #[test]
    fn test_external_missing_type() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::BadRequest")
            .record_like()
            .with_attribute(
                attr("parameters", TypeRef::class("String")).with_annotation(set_annotation(vec![
                    ParameterSpec::named("untyped"),
                ])),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::MissingType { ref parameter, .. } if parameter == "untyped"
        ));
    }

    #[test]
    fn test_external_unresolvable_type_is_fatal() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::BadRequest")
            .record_like()
            .with_attribute(
                attr("parameters", TypeRef::class("String")).with_annotation(set_annotation(vec![
                    ParameterSpec::named("blob").with_type("jobs::Blob"),
                ])),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::UnresolvableType { ref type_name, .. } if type_name == "jobs::Blob"
        ));
    }

    #[test]
    fn test_multiple_external_schemas() {
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::BadRequest")
            .record_like()
            .with_attribute(
                attr("one", TypeRef::class("String"))
                    .with_annotation(set_annotation(vec![ParameterSpec::named("a").with_type("String")])),
            )
            .with_attribute(
                attr("two", TypeRef::class("String"))
                    .with_annotation(set_annotation(vec![ParameterSpec::named("b").with_type("String")])),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let err = extractor.extract(&request).unwrap_err();
        match err {
            DiscoveryError::MultipleExternalSchemas { first, second, .. } => {
                assert_eq!(first, "one");
                assert_eq!(second, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_order_field_type_before_empty_list() {
        // Both violations present; the field-type check runs first
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::BadRequest")
            .record_like()
            .with_attribute(attr("parameters", TypeRef::primitive("i32")).with_annotation(set_annotation(vec![])));

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidExternalFieldType { .. }));
    }

    #[test]
    fn test_validation_order_names_before_types() {
        // Descriptor 0 has no type, descriptor 1 has no name; names win
        let catalog = InMemoryCatalog::new();
        let request = ClassMetadata::new("jobs::BadRequest")
            .record_like()
            .with_attribute(
                attr("parameters", TypeRef::class("String")).with_annotation(set_annotation(vec![
                    ParameterSpec::named("untyped"),
                    ParameterSpec::default().with_type("String"),
                ])),
            );

        let extractor = ParameterSchemaExtractor::new(&catalog);
        let err = extractor.extract(&request).unwrap_err();
        assert!(matches!(err, DiscoveryError::MissingName { position: 1, .. }));
    }
}
