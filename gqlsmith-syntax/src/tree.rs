//! The syntax tree capability.
//!
//! The merge engine only talks to a source file through [`SourceTree`], so a
//! different target language can plug in its own syntax library.

use crate::decl::{ClassDecl, DecoratorDecl, NamedImport, PropertyDecl};
use crate::error::SyntaxError;
use std::collections::BTreeSet;

/// Read-only view of a class declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassView {
    /// Class name.
    pub name: String,
    /// Names of the class-level decorators.
    pub decorators: Vec<String>,
    /// Properties in declaration order.
    pub properties: Vec<PropertyView>,
    /// Names of every named member (properties, methods and accessors).
    pub members: Vec<String>,
    /// Identifiers referenced anywhere in the class except its own name.
    pub references: BTreeSet<String>,
}

impl ClassView {
    /// Returns true if the class carries a decorator with this name.
    #[must_use]
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d == name)
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyView> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns true if any member, property or not, has this name.
    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Returns the property names in declaration order.
    #[must_use]
    pub fn property_names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }
}

/// Read-only view of a class property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyView {
    /// Property name.
    pub name: String,
    /// Names of the property decorators.
    pub decorators: Vec<String>,
    /// Identifiers referenced by the decorators, type and initializer.
    pub references: BTreeSet<String>,
}

impl PropertyView {
    /// Returns true if the property carries a decorator with this name.
    #[must_use]
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d == name)
    }
}

/// A parsed, mutable source file.
///
/// Mutations never touch content they do not name: printing a tree that was
/// parsed and not mutated reproduces every declaration as it was written.
pub trait SourceTree {
    /// Parses source text.
    ///
    /// # Errors
    /// Returns `SyntaxError` if the text cannot be parsed.
    fn parse(source: &str) -> Result<Self, SyntaxError>
    where
        Self: Sized;

    /// Prints the tree back to text.
    fn print(&self) -> String;

    /// Locates a class by name.
    fn find_class(&self, name: &str) -> Option<ClassView>;

    /// Appends a class declaration.
    fn add_class(&mut self, class: &ClassDecl);

    /// Appends a property to a class. Returns false if the class is missing.
    fn add_property(&mut self, class: &str, property: &PropertyDecl) -> bool;

    /// Removes a property from a class. Returns false if nothing was removed.
    fn remove_property(&mut self, class: &str, property: &str) -> bool;

    /// Appends a class-level decorator. Returns false if the class is missing.
    fn add_class_decorator(&mut self, class: &str, decorator: &DecoratorDecl) -> bool;

    /// Removes a class-level decorator by name. Returns false if nothing was removed.
    fn remove_class_decorator(&mut self, class: &str, decorator: &str) -> bool;

    /// Lists the named imports the tree manages.
    fn named_imports(&self) -> Vec<NamedImport>;

    /// Adds a named import. Returns false if it was already present.
    fn add_named_import(&mut self, import: NamedImport) -> bool;

    /// Removes a named import. Returns false if it was not present.
    fn remove_named_import(&mut self, import: &NamedImport) -> bool;

    /// Names re-exported from other modules.
    fn exported_names(&self) -> BTreeSet<String>;

    /// Returns true if a commented-out declaration of the class exists.
    fn has_commented_class(&self, name: &str) -> bool;

    /// Appends the class as a commented-out block.
    fn append_commented_class(&mut self, class: &ClassDecl);

    /// Identifiers referenced outside the named class and outside imports.
    fn references_outside(&self, class: &str) -> BTreeSet<String>;
}
