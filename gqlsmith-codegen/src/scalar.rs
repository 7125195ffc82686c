//! Scalar kinds and their printed and wire types.

use crate::config::{Config, ScalarOverride};
use crate::error::CodegenError;
use crate::layout::ClassRef;
use std::fmt;
use std::str::FromStr;

/// Primitive scalar kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Text.
    String,
    /// Integer.
    Int,
    /// Floating point.
    Float,
    /// Boolean.
    Boolean,
    /// Byte sequence.
    Bytes,
    /// Arbitrary-precision decimal.
    Decimal,
    /// Arbitrary-precision integer.
    BigInt,
    /// Opaque structured data.
    Json,
    /// Date and time.
    DateTime,
}

impl ScalarKind {
    /// Every scalar kind.
    pub const ALL: [Self; 9] = [
        Self::String,
        Self::Int,
        Self::Float,
        Self::Boolean,
        Self::Bytes,
        Self::Decimal,
        Self::BigInt,
        Self::Json,
        Self::DateTime,
    ];

    /// Returns the kind name as written in metadata and configuration.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Bytes => "Bytes",
            Self::Decimal => "Decimal",
            Self::BigInt => "BigInt",
            Self::Json => "Json",
            Self::DateTime => "DateTime",
        }
    }

    /// Returns true if default values of this kind are string literals.
    #[must_use]
    pub const fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::String | Self::Bytes | Self::Decimal | Self::BigInt | Self::DateTime
        )
    }
}

impl FromStr for ScalarKind {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CodegenError::unknown_type(s, ""))
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an imported symbol comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportSource {
    /// A package or fixed module specifier.
    Package(String),
    /// Another generated file, resolved relative to the importing file.
    Generated(ClassRef),
}

/// A symbol a resolved type needs in scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportSpec {
    /// Imported symbol.
    pub name: String,
    /// Its source.
    pub source: ImportSource,
}

impl ImportSpec {
    /// Imports `name` from a package module.
    #[must_use]
    pub fn package(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ImportSource::Package(module.into()),
        }
    }

    /// Imports a generated class.
    #[must_use]
    pub fn generated(class: ClassRef) -> Self {
        Self {
            name: class.name.clone(),
            source: ImportSource::Generated(class),
        }
    }
}

/// Printed type, wire marker and imports of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Union members of the printed type, before list wrapping.
    pub printed: Vec<String>,
    /// Wire marker, before list wrapping.
    pub wire: String,
    /// Symbols the printed type and wire marker reference.
    pub imports: Vec<ImportSpec>,
    /// Whether the field is a list.
    pub is_list: bool,
    /// Whether the field accepts null.
    pub nullable: bool,
}

impl ResolvedType {
    /// Creates a single-member type whose printed and wire names match.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            printed: vec![name.clone()],
            wire: name,
            imports: Vec::new(),
            is_list: false,
            nullable: false,
        }
    }

    /// Adds an import.
    #[must_use]
    pub fn with_import(mut self, import: ImportSpec) -> Self {
        self.imports.push(import);
        self
    }

    /// Sets list-ness.
    #[must_use]
    pub fn with_list(mut self, is_list: bool) -> Self {
        self.is_list = is_list;
        self
    }

    /// Sets nullability.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Returns the printed type; lists wrap every union member.
    #[must_use]
    pub fn printed_type(&self) -> String {
        let members: Vec<String> = if self.is_list {
            self.printed.iter().map(|m| format!("Array<{m}>")).collect()
        } else {
            self.printed.clone()
        };
        members.join(" | ")
    }

    /// Returns the wire marker, list-wrapped when needed.
    #[must_use]
    pub fn wire_marker(&self) -> String {
        if self.is_list {
            format!("[{}]", self.wire)
        } else {
            self.wire.clone()
        }
    }

    /// Returns the type function passed to the field decorator.
    #[must_use]
    pub fn wire_expr(&self) -> String {
        format!("() => {}", self.wire_marker())
    }
}

/// Built-in printed type, wire marker and wire import of a kind.
struct BuiltIn {
    printed: &'static [&'static str],
    wire: &'static str,
    wire_module: Option<WireModule>,
}

enum WireModule {
    Framework,
    Package(&'static str),
}

fn built_in(kind: ScalarKind) -> BuiltIn {
    let (printed, wire, wire_module): (&'static [&'static str], _, _) = match kind {
        ScalarKind::String => (&["string"], "String", None),
        ScalarKind::Int => (&["number"], "Int", Some(WireModule::Framework)),
        ScalarKind::Float => (&["number"], "Float", Some(WireModule::Framework)),
        ScalarKind::Boolean => (&["boolean"], "Boolean", None),
        ScalarKind::Bytes => (&["Buffer"], "String", None),
        ScalarKind::Decimal => (&["string"], "String", None),
        ScalarKind::BigInt => (
            &["bigint"],
            "GraphQLBigInt",
            Some(WireModule::Package("graphql-scalars")),
        ),
        ScalarKind::Json => (
            &["object"],
            "GraphQLJSON",
            Some(WireModule::Package("graphql-type-json")),
        ),
        ScalarKind::DateTime => (&["Date", "string"], "String", None),
    };
    BuiltIn {
        printed,
        wire,
        wire_module,
    }
}

/// Maps scalar kinds to resolved types, applying configured overrides.
#[derive(Debug, Clone, Copy)]
pub struct ScalarMapper<'a> {
    config: &'a Config,
}

impl<'a> ScalarMapper<'a> {
    /// Creates a mapper.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Maps a built-in scalar kind.
    ///
    /// A configured `fieldType` replaces the printed type and, with a
    /// `fieldModule`, is imported; a configured `wireType` replaces the wire
    /// marker independently.
    #[must_use]
    pub fn map(&self, kind: ScalarKind, is_list: bool, is_null: bool) -> ResolvedType {
        let base = built_in(kind);
        let mut resolved = ResolvedType {
            printed: base.printed.iter().map(|s| (*s).to_string()).collect(),
            wire: base.wire.to_string(),
            imports: Vec::new(),
            is_list,
            nullable: is_null,
        };
        let wire_import = base.wire_module.map(|module| {
            let module = match module {
                WireModule::Framework => self.config.decorators().module.clone(),
                WireModule::Package(module) => module.to_string(),
            };
            ImportSpec::package(base.wire, module)
        });

        match self.config.scalar_override(kind.name()) {
            Some(overrides) => {
                self.apply_override(&mut resolved, overrides, wire_import);
            }
            None => resolved.imports.extend(wire_import),
        }
        resolved
    }

    /// Maps a scalar by its metadata name.
    ///
    /// Names outside the built-in table are accepted when the configuration
    /// supplies both a printed type and a wire marker for them.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownType` if the name cannot be mapped.
    pub fn map_name(
        &self,
        type_name: &str,
        field: &str,
        is_list: bool,
        is_null: bool,
    ) -> Result<ResolvedType, CodegenError> {
        if let Ok(kind) = type_name.parse::<ScalarKind>() {
            return Ok(self.map(kind, is_list, is_null));
        }

        let overrides = self
            .config
            .scalar_override(type_name)
            .filter(|o| o.field_type.is_some() && o.wire_type.is_some())
            .ok_or_else(|| CodegenError::unknown_type(type_name, field))?;

        let mut resolved = ResolvedType::named(type_name)
            .with_list(is_list)
            .with_nullable(is_null);
        self.apply_override(&mut resolved, overrides, None);
        Ok(resolved)
    }

    fn apply_override(
        &self,
        resolved: &mut ResolvedType,
        overrides: &ScalarOverride,
        wire_import: Option<ImportSpec>,
    ) {
        if let Some(field_type) = &overrides.field_type {
            resolved.printed = field_type
                .split('|')
                .map(|member| member.trim().to_string())
                .filter(|member| !member.is_empty())
                .collect();
            if let Some(module) = &overrides.field_module {
                for member in &resolved.printed {
                    if is_identifier(member) {
                        resolved
                            .imports
                            .push(ImportSpec::package(member.clone(), module.clone()));
                    }
                }
            }
        }

        match &overrides.wire_type {
            Some(wire_type) => {
                resolved.wire = wire_type.clone();
                if let Some(module) = &overrides.wire_module
                    && is_identifier(wire_type)
                {
                    resolved
                        .imports
                        .push(ImportSpec::package(wire_type.clone(), module.clone()));
                }
            }
            None => resolved.imports.extend(wire_import),
        }
    }
}

/// Returns true if `text` is a plain identifier.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_string() {
        let config = Config::new();
        let resolved = ScalarMapper::new(&config).map(ScalarKind::String, false, false);
        assert_eq!(resolved.printed_type(), "string");
        assert_eq!(resolved.wire_expr(), "() => String");
        assert!(resolved.imports.is_empty());
    }

    #[test]
    fn test_map_numeric_markers_differ() {
        let config = Config::new();
        let mapper = ScalarMapper::new(&config);
        let int = mapper.map(ScalarKind::Int, false, false);
        let float = mapper.map(ScalarKind::Float, false, false);
        assert_eq!(int.printed_type(), float.printed_type());
        assert_ne!(int.wire, float.wire);
        assert_eq!(int.imports, vec![ImportSpec::package("Int", "@nestjs/graphql")]);
    }

    #[test]
    fn test_map_json_and_bigint_imports() {
        let config = Config::new();
        let mapper = ScalarMapper::new(&config);
        let json = mapper.map(ScalarKind::Json, false, true);
        assert_eq!(json.printed_type(), "object");
        assert_eq!(json.imports, vec![ImportSpec::package("GraphQLJSON", "graphql-type-json")]);
        assert!(json.nullable);

        let bigint = mapper.map(ScalarKind::BigInt, false, false);
        assert_eq!(bigint.wire, "GraphQLBigInt");
        assert_eq!(
            bigint.imports,
            vec![ImportSpec::package("GraphQLBigInt", "graphql-scalars")]
        );
    }

    #[test]
    fn test_map_date_time_union() {
        let config = Config::new();
        let mapper = ScalarMapper::new(&config);

        let single = mapper.map(ScalarKind::DateTime, false, true);
        assert_eq!(single.printed_type(), "Date | string");

        let list = mapper.map(ScalarKind::DateTime, true, false);
        assert_eq!(list.printed_type(), "Array<Date> | Array<string>");
        assert_eq!(list.wire_expr(), "() => [String]");
    }

    #[test]
    fn test_field_type_override() {
        let config = Config::new().with_scalar_override(
            "Decimal",
            ScalarOverride::field_type("MyDec", "decimal.js"),
        );
        let resolved = ScalarMapper::new(&config).map(ScalarKind::Decimal, false, false);
        assert_eq!(resolved.printed_type(), "MyDec");
        assert_eq!(resolved.wire, "String");
        assert_eq!(resolved.imports, vec![ImportSpec::package("MyDec", "decimal.js")]);
    }

    #[test]
    fn test_wire_override_keeps_printed_type() {
        let config = Config::from_entries([
            ("types.Int.wireType", "GraphQLInt"),
            ("types.Int.wireModule", "graphql"),
        ])
        .expect("valid entries");
        let resolved = ScalarMapper::new(&config).map(ScalarKind::Int, true, false);
        assert_eq!(resolved.printed_type(), "Array<number>");
        assert_eq!(resolved.wire_marker(), "[GraphQLInt]");
        assert_eq!(resolved.imports, vec![ImportSpec::package("GraphQLInt", "graphql")]);
    }

    #[test]
    fn test_union_override_is_split() {
        let config = Config::from_entries([("types.DateTime.fieldType", "Date | number")])
            .expect("valid entries");
        let resolved = ScalarMapper::new(&config).map(ScalarKind::DateTime, true, false);
        assert_eq!(resolved.printed_type(), "Array<Date> | Array<number>");
        assert!(resolved.imports.is_empty());
    }

    #[test]
    fn test_map_name_unknown() {
        let config = Config::new();
        let err = ScalarMapper::new(&config)
            .map_name("Geometry", "area", false, false)
            .unwrap_err();
        assert!(matches!(err, CodegenError::UnknownType { ref field, .. } if field == "area"));
    }

    #[test]
    fn test_map_name_custom_scalar() {
        let config = Config::from_entries([
            ("types.Geometry.fieldType", "Polygon"),
            ("types.Geometry.fieldModule", "geojson"),
            ("types.Geometry.wireType", "GraphQLJSON"),
            ("types.Geometry.wireModule", "graphql-type-json"),
        ])
        .expect("valid entries");
        let resolved = ScalarMapper::new(&config)
            .map_name("Geometry", "area", false, false)
            .expect("mapped");
        assert_eq!(resolved.printed_type(), "Polygon");
        assert_eq!(resolved.imports.len(), 2);
    }

    #[test]
    fn test_scalar_kind_from_str() {
        assert_eq!("DateTime".parse::<ScalarKind>().ok(), Some(ScalarKind::DateTime));
        assert!("Datetime".parse::<ScalarKind>().is_err());
    }
}
