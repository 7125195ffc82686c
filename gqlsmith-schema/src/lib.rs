//! # gqlsmith Schema
//!
//! Entity metadata document model and loader.
//!
//! This crate provides:
//! - The metadata document types (models, enums, input and output shapes)
//! - JSON loading of a metadata document
//! - Metadata validation
//! - Naming helpers shared by code generation

pub mod error;
pub mod naming;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_metadata, parse_metadata_file};
pub use types::{
    Definition, EnumDef, FieldAlternative, FieldKind, Metadata, Model, ModelField, ShapeDef,
    ShapeField, TypeCategory,
};
pub use validation::validate_metadata;
