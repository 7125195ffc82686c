//! Error types for metadata loading and validation.

use thiserror::Error;

/// Error type for metadata loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid document structure.
    #[error("invalid metadata structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for metadata validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (model, enum, field, etc.).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Unknown type reference.
    #[error("unknown {kind} '{type_name}' referenced by field '{field}'")]
    UnknownReference {
        /// Kind of referenced definition.
        kind: String,
        /// Referenced name.
        type_name: String,
        /// Referencing field, qualified with its owner.
        field: String,
    },

    /// Enum without values.
    #[error("enum '{name}' has no values")]
    EmptyEnum {
        /// Enum name.
        name: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an unknown reference error.
    pub fn unknown_reference(
        kind: impl Into<String>,
        type_name: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::UnknownReference {
            kind: kind.into(),
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}
