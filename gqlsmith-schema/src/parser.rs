//! Metadata document loader.
//!
//! This module decodes the JSON metadata document produced by the external
//! schema compiler into the internal [`Metadata`] representation.

use crate::error::ParseError;
use crate::types::Metadata;
use std::path::Path;

/// Parses a metadata document from a JSON string.
///
/// # Arguments
/// * `json` - Metadata document content
///
/// # Returns
/// Parsed metadata with its name index built.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or a definition has no name.
pub fn parse_metadata(json: &str) -> Result<Metadata, ParseError> {
    let mut metadata: Metadata = serde_json::from_str(json)?;
    check_names(&metadata)?;
    metadata.build_index();
    Ok(metadata)
}

/// Parses a metadata document from a file.
///
/// # Errors
/// Returns `ParseError` if reading or decoding fails.
pub fn parse_metadata_file(path: &Path) -> Result<Metadata, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_metadata(&json)
}

/// Rejects definitions and fields with blank names.
fn check_names(metadata: &Metadata) -> Result<(), ParseError> {
    for model in &metadata.models {
        if model.name.trim().is_empty() {
            return Err(ParseError::invalid_structure("model without a name"));
        }
        if let Some(field) = model.fields.iter().find(|f| f.name.trim().is_empty()) {
            return Err(ParseError::invalid_structure(format!(
                "field without a name in model '{}' (type '{}')",
                model.name, field.type_name
            )));
        }
    }

    for shape in metadata.input_shapes.iter().chain(&metadata.output_shapes) {
        if shape.name.trim().is_empty() {
            return Err(ParseError::invalid_structure("shape without a name"));
        }
        if shape.fields.iter().any(|f| f.name.trim().is_empty()) {
            return Err(ParseError::invalid_structure(format!(
                "field without a name in shape '{}'",
                shape.name
            )));
        }
    }

    if metadata.enums.iter().any(|e| e.name.trim().is_empty()) {
        return Err(ParseError::invalid_structure("enum without a name"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldKind, TypeCategory};

    const USER_METADATA: &str = r#"{
        "models": [{
            "name": "User",
            "documentation": "User really",
            "fields": [
                { "name": "id", "kind": "scalar", "type": "String", "isRequired": true, "isId": true },
                { "name": "role", "kind": "enum", "type": "Role", "isRequired": true, "hasDefault": true, "defaultLiteral": "USER" },
                { "name": "posts", "kind": "object", "type": "Post", "isList": true }
            ]
        }],
        "inputShapes": [{
            "name": "UserWhereInput",
            "fields": [{
                "name": "id",
                "alternatives": [
                    { "type": "StringFilter", "category": "plainObject" },
                    { "name": "String", "category": "scalar" }
                ]
            }]
        }],
        "enums": [{ "name": "Role", "values": ["USER", "ADMIN"] }]
    }"#;

    #[test]
    fn test_parse_metadata() {
        let metadata = parse_metadata(USER_METADATA).expect("Failed to parse");

        assert_eq!(metadata.models.len(), 1);
        assert_eq!(metadata.input_shapes.len(), 1);
        assert!(metadata.output_shapes.is_empty());

        let user = metadata.model("User").expect("User missing");
        assert_eq!(user.documentation.as_deref(), Some("User really"));
        assert_eq!(user.fields[0].name, "id");
        assert!(user.fields[0].is_id);
        assert_eq!(user.fields[1].kind, FieldKind::Enum);
        assert_eq!(user.fields[1].default_literal.as_deref(), Some("USER"));
        assert_eq!(user.fields[2].kind, FieldKind::Relation);
        assert!(user.fields[2].is_list);
        assert!(!user.fields[2].is_required);
    }

    #[test]
    fn test_parse_alternatives_accept_type_alias() {
        let metadata = parse_metadata(USER_METADATA).expect("Failed to parse");
        let shape = metadata.input_shape("UserWhereInput").expect("shape missing");
        let alternatives = &shape.fields[0].alternatives;

        assert_eq!(alternatives[0].name, "StringFilter");
        assert_eq!(alternatives[0].category, TypeCategory::PlainObject);
        assert_eq!(alternatives[1].name, "String");
        assert!(!alternatives[1].is_list);
    }

    #[test]
    fn test_parse_empty_document() {
        let metadata = parse_metadata("{}").expect("Failed to parse");
        assert!(metadata.models.is_empty());
        assert!(metadata.enums.is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = parse_metadata("{ \"models\": [");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_blank_model_name() {
        let result = parse_metadata(r#"{ "models": [{ "name": " " }] }"#);
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_parse_unknown_category() {
        let json = r#"{ "inputShapes": [{ "name": "A", "fields": [{
            "name": "a", "alternatives": [{ "name": "X", "category": "tuple" }] }] }] }"#;
        assert!(parse_metadata(json).is_err());
    }
}
