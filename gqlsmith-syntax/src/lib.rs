//! # gqlsmith Syntax
//!
//! The syntax tree capability consumed by the merge engine.
//!
//! This crate provides:
//! - The [`SourceTree`] trait: parse, locate classes, mutate members,
//!   decorators and imports, print
//! - Declaration structures handed to a tree for insertion
//! - [`TsSourceFile`], a TypeScript implementation backed by tree-sitter

pub mod decl;
pub mod error;
pub mod tree;
pub mod typescript;

pub use decl::{ClassDecl, DecoratorArg, DecoratorDecl, NamedImport, PropertyDecl};
pub use error::SyntaxError;
pub use tree::{ClassView, PropertyView, SourceTree};
pub use typescript::TsSourceFile;
