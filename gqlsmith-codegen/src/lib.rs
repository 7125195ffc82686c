//! # gqlsmith Codegen
//!
//! Decorated class synthesis from entity metadata.
//!
//! This crate provides:
//! - Scalar mapping with configurable overrides
//! - Resolution of multi-representation input fields
//! - Class synthesis for models, input shapes and output shapes
//! - Import planning and non-destructive merge into existing files
//! - Enum file generation

pub mod class;
pub mod config;
pub mod enums;
pub mod error;
pub mod generator;
pub mod imports;
pub mod layout;
pub mod merge;
pub mod resolver;
pub mod scalar;

pub use class::{ClassDescriptor, ClassMode, ClassSource, ClassSynthesizer, FieldDescriptor};
pub use config::{Config, DecoratorNames, ScalarOverride};
pub use enums::EnumGenerator;
pub use error::CodegenError;
pub use generator::{GeneratedFile, GenerationOutput, Generator, Target, TargetKind};
pub use imports::ImportPlanner;
pub use layout::{ClassRef, FileKind, ModuleLayout};
pub use merge::{ExistingFileState, MergeEngine, MergeReport, MergeState};
pub use resolver::{Resolution, TypeResolver};
pub use scalar::{ImportSource, ImportSpec, ResolvedType, ScalarKind, ScalarMapper};

use gqlsmith_syntax::TsSourceFile;

/// Generates every file from a metadata document, with no prior files.
///
/// # Arguments
/// * `json` - Metadata document content
/// * `config` - Generation options
///
/// # Returns
/// The generated files and the targets that failed.
///
/// # Errors
/// Returns `CodegenError` if the metadata cannot be parsed or is inconsistent.
pub fn generate_from_json(json: &str, config: &Config) -> Result<GenerationOutput, CodegenError> {
    let metadata = gqlsmith_schema::parse_metadata(json)?;
    gqlsmith_schema::validate_metadata(&metadata)?;
    let generator = Generator::new(&metadata, config);
    Ok(generator.generate_all::<TsSourceFile, _>(|_| None))
}

/// Generates every file from a metadata document file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing or validation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &Config,
) -> Result<GenerationOutput, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_from_json() {
        let json = r#"{
  "models": [
    {
      "name": "Post",
      "fields": [
        { "name": "tags", "kind": "scalar", "type": "DateTime", "isList": true, "isRequired": true }
      ]
    }
  ]
}"#;
        let output = generate_from_json(json, &Config::new()).expect("generated");
        let file = output.file("post/post.model.ts").expect("file");
        assert!(file.content.contains("    @Field(() => [String], {\n"));
        assert!(file.content.contains("    tags!: Array<Date> | Array<string>;"));
        assert!(output.is_complete());
    }

    #[test]
    fn test_generate_from_json_rejects_malformed() {
        let result = generate_from_json("{ not json", &Config::new());
        assert!(matches!(result, Err(CodegenError::Parse(_))));
    }

    #[test]
    fn test_generate_from_missing_file() {
        let path = std::path::Path::new("/nonexistent/metadata.json");
        let result = generate_from_file(path, &Config::new());
        assert!(matches!(result, Err(CodegenError::Io(_))));
    }
}
