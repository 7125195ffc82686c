//! # gqlsmith
//!
//! Generates decorated GraphQL classes from entity metadata and merges them
//! into existing TypeScript files without destroying hand-written code.
//!
//! ## Features
//!
//! - **Additive merge** - existing properties are never removed or rewritten
//! - **Opt-out** - undecorated classes and properties are left alone
//! - **Import hygiene** - the import block is recomputed on every run
//! - **Scalar overrides** - printed and wire types are configurable per scalar
//!
//! ## Quick Start
//!
//! ```ignore
//! use gqlsmith::prelude::*;
//! use std::path::Path;
//!
//! let config = Config::from_toml_str(r#"
//! output = "src/generated"
//! [types.Decimal]
//! fieldType = "Decimal"
//! fieldModule = "decimal.js"
//! "#)?;
//! let summary = generate_into_from_file(Path::new("metadata.json"), &config)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Metadata document model, loading and validation
//! - [`syntax`] - Syntax tree capability and the TypeScript source model
//! - [`codegen`] - Synthesis, import planning and merge
//! - [`output`] - File system driver

pub mod output;
pub mod prelude;

/// Metadata document model, loading and validation.
pub mod schema {
    pub use gqlsmith_schema::*;
}

/// Syntax tree capability and TypeScript source model.
pub mod syntax {
    pub use gqlsmith_syntax::*;
}

/// Class synthesis, import planning and merge.
pub mod codegen {
    pub use gqlsmith_codegen::*;
}

// Re-export commonly used items at the crate root
pub use gqlsmith_codegen::{
    CodegenError, Config, GeneratedFile, GenerationOutput, Generator, MergeReport, MergeState,
    generate_from_file, generate_from_json,
};
pub use gqlsmith_schema::{Metadata, parse_metadata, parse_metadata_file};
pub use gqlsmith_syntax::{SourceTree, TsSourceFile};
pub use output::{WriteSummary, generate_into, generate_into_from_file};
