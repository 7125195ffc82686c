//! Prelude module for convenient imports.
//!
//! ```ignore
//! use gqlsmith::prelude::*;
//! ```

// Metadata
pub use gqlsmith_schema::{
    EnumDef, FieldAlternative, FieldKind, Metadata, Model, ModelField, ShapeDef, ShapeField,
    TypeCategory, parse_metadata, parse_metadata_file, validate_metadata,
};

// Syntax tree
pub use gqlsmith_syntax::{ClassView, NamedImport, SourceTree, SyntaxError, TsSourceFile};

// Generation
pub use gqlsmith_codegen::{
    ClassDescriptor, ClassMode, ClassSynthesizer, CodegenError, Config, DecoratorNames,
    GeneratedFile, GenerationOutput, Generator, ImportPlanner, MergeEngine, MergeReport,
    MergeState, ScalarKind, ScalarMapper, ScalarOverride, Target, TargetKind, TypeResolver,
};

// File system driver
pub use crate::output::{WriteSummary, generate_into, generate_into_from_file};
