//! Metadata validation utilities.
//!
//! This module checks a loaded metadata document for structural consistency
//! before code generation: unique names and resolvable references.

use crate::error::SchemaError;
use crate::types::{EnumDef, FieldKind, Metadata, Model, ShapeDef};
use std::collections::HashSet;

/// Validates a metadata document for consistency.
///
/// Shape fields without alternatives are not reported here; they surface as a
/// resolution failure for the owning class during generation.
///
/// # Errors
/// Returns `SchemaError` describing the first problem found.
pub fn validate_metadata(metadata: &Metadata) -> Result<(), SchemaError> {
    validate_unique_names(metadata)?;
    for model in &metadata.models {
        validate_model(metadata, model)?;
    }
    for shape in metadata.input_shapes.iter().chain(&metadata.output_shapes) {
        validate_shape(shape)?;
    }
    for enum_def in &metadata.enums {
        validate_enum(enum_def)?;
    }
    Ok(())
}

/// Validates that top-level definition names are unique.
fn validate_unique_names(metadata: &Metadata) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    let named = metadata
        .models
        .iter()
        .map(|m| ("model", m.name.as_str()))
        .chain(metadata.enums.iter().map(|e| ("enum", e.name.as_str())))
        .chain(
            metadata
                .input_shapes
                .iter()
                .map(|s| ("input shape", s.name.as_str())),
        )
        .chain(
            metadata
                .output_shapes
                .iter()
                .map(|s| ("output shape", s.name.as_str())),
        );

    for (kind, name) in named {
        if !seen.insert(name) {
            return Err(SchemaError::duplicate(kind, name));
        }
    }
    Ok(())
}

/// Validates a model's fields.
fn validate_model(metadata: &Metadata, model: &Model) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for field in &model.fields {
        if !seen_names.insert(&field.name) {
            return Err(SchemaError::duplicate(
                "field",
                format!("{}.{}", model.name, field.name),
            ));
        }

        let qualified = || format!("{}.{}", model.name, field.name);
        match field.kind {
            FieldKind::Relation if metadata.model(&field.type_name).is_none() => {
                return Err(SchemaError::unknown_reference(
                    "model",
                    &field.type_name,
                    qualified(),
                ));
            }
            FieldKind::Enum if metadata.enum_def(&field.type_name).is_none() => {
                return Err(SchemaError::unknown_reference(
                    "enum",
                    &field.type_name,
                    qualified(),
                ));
            }
            _ => {}
        }

        if field.is_id && field.is_list {
            return Err(SchemaError::Validation {
                message: format!("identifier field '{}' cannot be a list", qualified()),
            });
        }
    }

    Ok(())
}

/// Validates a shape's field names.
fn validate_shape(shape: &ShapeDef) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for field in &shape.fields {
        if !seen_names.insert(&field.name) {
            return Err(SchemaError::duplicate(
                "field",
                format!("{}.{}", shape.name, field.name),
            ));
        }
    }

    Ok(())
}

/// Validates an enum definition.
fn validate_enum(enum_def: &EnumDef) -> Result<(), SchemaError> {
    if enum_def.values.is_empty() {
        return Err(SchemaError::EmptyEnum {
            name: enum_def.name.clone(),
        });
    }

    let mut seen_values = HashSet::new();
    for value in &enum_def.values {
        if !seen_values.insert(value) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate enum value '{}' in enum '{}'",
                    value, enum_def.name
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_metadata;

    fn parse(json: &str) -> Metadata {
        parse_metadata(json).expect("Failed to parse")
    }

    #[test]
    fn test_validate_valid_metadata() {
        let metadata = parse(
            r#"{
            "models": [
                { "name": "User", "fields": [
                    { "name": "id", "kind": "scalar", "type": "Int", "isId": true },
                    { "name": "role", "kind": "enum", "type": "Role" },
                    { "name": "posts", "kind": "relation", "type": "Post", "isList": true }
                ] },
                { "name": "Post", "fields": [] }
            ],
            "enums": [{ "name": "Role", "values": ["USER"] }]
        }"#,
        );
        assert!(validate_metadata(&metadata).is_ok());
    }

    #[test]
    fn test_validate_duplicate_model() {
        let metadata = parse(r#"{ "models": [{ "name": "User" }, { "name": "User" }] }"#);
        assert!(matches!(
            validate_metadata(&metadata),
            Err(SchemaError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_validate_name_shared_by_model_and_shape() {
        let metadata = parse(
            r#"{ "models": [{ "name": "User" }], "inputShapes": [{ "name": "User" }] }"#,
        );
        assert!(validate_metadata(&metadata).is_err());
    }

    #[test]
    fn test_validate_duplicate_field() {
        let metadata = parse(
            r#"{ "models": [{ "name": "User", "fields": [
                { "name": "id", "kind": "scalar", "type": "Int" },
                { "name": "id", "kind": "scalar", "type": "String" }
            ] }] }"#,
        );
        let err = validate_metadata(&metadata).expect_err("duplicate field accepted");
        assert!(err.to_string().contains("User.id"));
    }

    #[test]
    fn test_validate_unknown_relation() {
        let metadata = parse(
            r#"{ "models": [{ "name": "User", "fields": [
                { "name": "posts", "kind": "relation", "type": "Post", "isList": true }
            ] }] }"#,
        );
        assert!(matches!(
            validate_metadata(&metadata),
            Err(SchemaError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_enum() {
        let metadata = parse(
            r#"{ "models": [{ "name": "User", "fields": [
                { "name": "role", "kind": "enum", "type": "Role" }
            ] }] }"#,
        );
        assert!(validate_metadata(&metadata).is_err());
    }

    #[test]
    fn test_validate_empty_enum() {
        let metadata = parse(r#"{ "enums": [{ "name": "Role", "values": [] }] }"#);
        assert!(matches!(
            validate_metadata(&metadata),
            Err(SchemaError::EmptyEnum { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_enum_value() {
        let metadata = parse(r#"{ "enums": [{ "name": "Role", "values": ["A", "A"] }] }"#);
        assert!(validate_metadata(&metadata).is_err());
    }

    #[test]
    fn test_validate_shape_without_alternatives_is_accepted() {
        let metadata = parse(
            r#"{ "inputShapes": [{ "name": "X", "fields": [{ "name": "a", "alternatives": [] }] }] }"#,
        );
        assert!(validate_metadata(&metadata).is_ok());
    }
}
