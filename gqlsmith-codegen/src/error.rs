//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Metadata parsing error.
    #[error("metadata parse error: {0}")]
    Parse(#[from] gqlsmith_schema::ParseError),

    /// Metadata validation error.
    #[error("metadata error: {0}")]
    Schema(#[from] gqlsmith_schema::SchemaError),

    /// Existing source could not be parsed.
    #[error("source error: {0}")]
    Syntax(#[from] gqlsmith_syntax::SyntaxError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field offered no candidate representation.
    #[error("cannot resolve a type for field '{field}' of class '{class}'")]
    Resolution {
        /// Class being synthesized.
        class: String,
        /// Field without alternatives.
        field: String,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' in field '{field}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// Configuration key or value error.
    #[error("invalid configuration '{key}': {message}")]
    Config {
        /// Offending key.
        key: String,
        /// Error message.
        message: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a resolution error for a class field.
    pub fn resolution(class: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Resolution {
            class: class.into(),
            field: field.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}
