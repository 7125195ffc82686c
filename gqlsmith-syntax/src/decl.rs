//! Declaration structures inserted into a source tree.
//!
//! These describe *what* to add; each [`SourceTree`](crate::SourceTree)
//! implementation decides how the declaration is spelled in its syntax.

/// A single named import: `name` imported from `module`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamedImport {
    /// Imported symbol.
    pub name: String,
    /// Module specifier.
    pub module: String,
}

impl NamedImport {
    /// Creates a named import.
    #[must_use]
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
        }
    }

    /// Returns true if the module is a relative path.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.module.starts_with('.')
    }
}

/// Decorator call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoratorArg {
    /// Expression transcribed as-is.
    Expr(String),
    /// Object literal of `key: value` entries, in order.
    Object(Vec<(String, String)>),
}

/// Decorator call, e.g. `@Field(() => Int, { nullable: true })`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorDecl {
    /// Decorator function name.
    pub name: String,
    /// Call arguments; empty renders as `@Name()`.
    pub arguments: Vec<DecoratorArg>,
}

impl DecoratorDecl {
    /// Creates a decorator call without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Appends an expression argument.
    #[must_use]
    pub fn arg(mut self, expr: impl Into<String>) -> Self {
        self.arguments.push(DecoratorArg::Expr(expr.into()));
        self
    }

    /// Appends an object literal argument. Empty objects are skipped.
    #[must_use]
    pub fn object(mut self, entries: Vec<(String, String)>) -> Self {
        if !entries.is_empty() {
            self.arguments.push(DecoratorArg::Object(entries));
        }
        self
    }
}

/// Class property declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    /// Property name.
    pub name: String,
    /// Decorators, outermost first.
    pub decorators: Vec<DecoratorDecl>,
    /// Required properties are definitely assigned; others are optional.
    pub required: bool,
    /// Printed type expression.
    pub type_text: String,
}

/// Class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// Class name.
    pub name: String,
    /// Whether the class is exported.
    pub exported: bool,
    /// Class decorators.
    pub decorators: Vec<DecoratorDecl>,
    /// Properties in order.
    pub properties: Vec<PropertyDecl>,
}
