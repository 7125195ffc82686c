//! Generation configuration.
//!
//! Configuration is a flat, dot-addressed key/value surface:
//!
//! | key | meaning |
//! |---|---|
//! | `types.<Kind>.fieldType` | printed type override |
//! | `types.<Kind>.fieldModule` | module the printed type is imported from |
//! | `types.<Kind>.wireType` | wire marker override |
//! | `types.<Kind>.wireModule` | module the wire marker is imported from |
//! | `decorators.module` | framework module |
//! | `decorators.field` | field decorator |
//! | `decorators.model` / `input` / `output` | class decorator per mode |
//! | `decorators.enumRegistration` | enum registration function |
//! | `output` | output base path |

use crate::error::CodegenError;
use crate::layout::{ClassRef, default_file_path};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Maps a class to its file path relative to the output base path.
pub type FilePathTemplate = Arc<dyn Fn(&ClassRef) -> String + Send + Sync>;

/// Override for one scalar kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarOverride {
    /// Printed type expression.
    pub field_type: Option<String>,
    /// Module the printed type is imported from.
    pub field_module: Option<String>,
    /// Wire marker expression.
    pub wire_type: Option<String>,
    /// Module the wire marker is imported from.
    pub wire_module: Option<String>,
}

impl ScalarOverride {
    /// Overrides the printed type, imported from `module`.
    #[must_use]
    pub fn field_type(field_type: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            field_module: Some(module.into()),
            ..Self::default()
        }
    }

    /// Sets the wire marker override.
    #[must_use]
    pub fn with_wire_type(mut self, wire_type: impl Into<String>) -> Self {
        self.wire_type = Some(wire_type.into());
        self
    }

    /// Sets the module of the wire marker override.
    #[must_use]
    pub fn with_wire_module(mut self, module: impl Into<String>) -> Self {
        self.wire_module = Some(module.into());
        self
    }
}

/// Decorator vocabulary of the API framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorNames {
    /// Module every decorator is imported from.
    pub module: String,
    /// Field decorator.
    pub field: String,
    /// Class decorator for entity models.
    pub model: String,
    /// Class decorator for input shapes.
    pub input: String,
    /// Class decorator for output shapes.
    pub output: String,
    /// Function registering an enum with the framework.
    pub enum_registration: String,
}

impl Default for DecoratorNames {
    fn default() -> Self {
        Self {
            module: "@nestjs/graphql".to_string(),
            field: "Field".to_string(),
            model: "ObjectType".to_string(),
            input: "InputType".to_string(),
            output: "ObjectType".to_string(),
            enum_registration: "registerEnumType".to_string(),
        }
    }
}

/// Generation configuration.
#[derive(Clone, Default)]
pub struct Config {
    types: BTreeMap<String, ScalarOverride>,
    decorators: DecoratorNames,
    output: PathBuf,
    file_path: Option<FilePathTemplate>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("types", &self.types)
            .field("decorators", &self.decorators)
            .field("output", &self.output)
            .field("custom_file_path", &self.file_path.is_some())
            .finish()
    }
}

impl Config {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from key/value pairs.
    ///
    /// # Arguments
    /// * `entries` - Dot-addressed keys and their values
    ///
    /// # Errors
    /// Returns `CodegenError::Config` for an unrecognised key.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, CodegenError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::new();
        for (key, value) in entries {
            config.set(key.as_ref(), value)?;
        }
        Ok(config)
    }

    /// Builds a configuration from TOML text.
    ///
    /// Nested tables are flattened into dot-addressed keys, so
    /// `[types.Decimal]` followed by `fieldType = "MyDec"` is the same as
    /// `"types.Decimal.fieldType" = "MyDec"`.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if the text is not valid TOML, a value
    /// is not a string, or a key is unrecognised.
    pub fn from_toml_str(text: &str) -> Result<Self, CodegenError> {
        let table: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| CodegenError::config("<toml>", e.message()))?;
        let mut entries = Vec::new();
        flatten_table("", &table, &mut entries)?;
        Self::from_entries(entries)
    }

    /// Sets a single key.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` for an unrecognised key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), CodegenError> {
        let value = value.into();
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["types", kind, attr] if !kind.is_empty() => {
                let entry = self.types.entry((*kind).to_string()).or_default();
                match *attr {
                    "fieldType" => entry.field_type = Some(value),
                    "fieldModule" => entry.field_module = Some(value),
                    "wireType" | "graphqlType" => entry.wire_type = Some(value),
                    "wireModule" | "graphqlModule" => entry.wire_module = Some(value),
                    _ => return Err(CodegenError::config(key, "unknown type attribute")),
                }
            }
            ["decorators", name] => {
                let slot = match *name {
                    "module" => &mut self.decorators.module,
                    "field" => &mut self.decorators.field,
                    "model" => &mut self.decorators.model,
                    "input" => &mut self.decorators.input,
                    "output" => &mut self.decorators.output,
                    "enumRegistration" => &mut self.decorators.enum_registration,
                    _ => return Err(CodegenError::config(key, "unknown decorator")),
                };
                *slot = value;
            }
            ["output"] => self.output = PathBuf::from(value),
            _ => return Err(CodegenError::config(key, "unknown key")),
        }
        Ok(())
    }

    /// Sets the override for a scalar kind.
    #[must_use]
    pub fn with_scalar_override(mut self, kind: impl Into<String>, value: ScalarOverride) -> Self {
        self.types.insert(kind.into(), value);
        self
    }

    /// Sets the decorator vocabulary.
    #[must_use]
    pub fn with_decorators(mut self, decorators: DecoratorNames) -> Self {
        self.decorators = decorators;
        self
    }

    /// Sets the output base path.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the per-class file path template.
    #[must_use]
    pub fn with_file_path_template<F>(mut self, template: F) -> Self
    where
        F: Fn(&ClassRef) -> String + Send + Sync + 'static,
    {
        self.file_path = Some(Arc::new(template));
        self
    }

    /// Returns the override for a scalar kind.
    #[must_use]
    pub fn scalar_override(&self, kind: &str) -> Option<&ScalarOverride> {
        self.types.get(kind)
    }

    /// Returns the decorator vocabulary.
    #[must_use]
    pub fn decorators(&self) -> &DecoratorNames {
        &self.decorators
    }

    /// Returns the output base path.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the file path of a class relative to the output base path.
    #[must_use]
    pub fn file_path(&self, class: &ClassRef) -> String {
        match &self.file_path {
            Some(template) => template(class),
            None => default_file_path(class),
        }
    }
}

/// Flattens nested TOML tables into dot-addressed string entries.
fn flatten_table(
    prefix: &str,
    table: &toml::Table,
    out: &mut Vec<(String, String)>,
) -> Result<(), CodegenError> {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten_table(&key, nested, out)?,
            toml::Value::String(text) => out.push((key, text.clone())),
            _ => return Err(CodegenError::config(key, "expected a string value")),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FileKind;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert_eq!(config.decorators().module, "@nestjs/graphql");
        assert_eq!(config.decorators().input, "InputType");
        assert_eq!(config.decorators().model, "ObjectType");
        assert!(config.scalar_override("Decimal").is_none());
        assert_eq!(config.output(), Path::new(""));
    }

    #[test]
    fn test_from_entries() {
        let config = Config::from_entries([
            ("types.Decimal.fieldType", "MyDec"),
            ("types.Decimal.fieldModule", "decimal.js"),
            ("decorators.input", "ArgsType"),
            ("output", "src/@generated"),
        ])
        .expect("valid entries");

        let decimal = config.scalar_override("Decimal").expect("override");
        assert_eq!(decimal.field_type.as_deref(), Some("MyDec"));
        assert_eq!(decimal.field_module.as_deref(), Some("decimal.js"));
        assert!(decimal.wire_type.is_none());
        assert_eq!(config.decorators().input, "ArgsType");
        assert_eq!(config.output(), Path::new("src/@generated"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_entries([("types.Decimal.color", "red")]).unwrap_err();
        assert!(matches!(err, CodegenError::Config { ref key, .. } if key == "types.Decimal.color"));
        assert!(Config::from_entries([("colors", "red")]).is_err());
        assert!(Config::from_entries([("decorators.method", "Get")]).is_err());
    }

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
output = "generated"

[types.Decimal]
fieldType = "Decimal"
fieldModule = "decimal.js"
wireType = "GraphQLDecimal"
wireModule = "prisma-graphql-type-decimal"

[decorators]
field = "Prop"
"#,
        )
        .expect("valid toml");

        let decimal = config.scalar_override("Decimal").expect("override");
        assert_eq!(decimal.wire_type.as_deref(), Some("GraphQLDecimal"));
        assert_eq!(
            decimal.wire_module.as_deref(),
            Some("prisma-graphql-type-decimal")
        );
        assert_eq!(config.decorators().field, "Prop");
        assert_eq!(config.output(), Path::new("generated"));
    }

    #[test]
    fn test_from_toml_str_rejects_non_string() {
        let err = Config::from_toml_str("output = 3").unwrap_err();
        assert!(matches!(err, CodegenError::Config { .. }));
        assert!(Config::from_toml_str("output = [").is_err());
    }

    #[test]
    fn test_file_path_template() {
        let class = ClassRef::new("UserWhereInput", FileKind::Input, "user");
        let config = Config::new();
        assert_eq!(config.file_path(&class), "user/user-where.input.ts");

        let config = config.with_file_path_template(|class| format!("{}.ts", class.name));
        assert_eq!(config.file_path(&class), "UserWhereInput.ts");
    }
}
