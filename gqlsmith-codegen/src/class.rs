//! Class synthesis.
//!
//! Builds a complete, ordered [`ClassDescriptor`] from a model or a shape.
//! The descriptor is recomputed on every run and only ever persisted as
//! rendered text.

use crate::config::{Config, DecoratorNames};
use crate::error::CodegenError;
use crate::layout::{ClassRef, FileKind, ModuleLayout};
use crate::resolver::TypeResolver;
use crate::scalar::{ImportSpec, ResolvedType, ScalarKind, ScalarMapper};
use gqlsmith_schema::{
    Definition, FieldKind, Metadata, Model, ModelField, ShapeDef, ShapeField, TypeCategory,
};
use gqlsmith_syntax::{ClassDecl, DecoratorDecl, PropertyDecl};
use std::collections::HashSet;

/// Wire marker of model identifier fields.
pub const ID_MARKER: &str = "ID";

/// Generation mode of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassMode {
    /// Entity read model.
    Model,
    /// Creation input; mandatory fields are required.
    Create,
    /// Update input; every field is optional.
    Update,
    /// Filter, where, order-by and aggregate inputs; every field is optional.
    Filter,
    /// Output shape.
    Output,
}

impl ClassMode {
    /// Infers the mode of an input shape from its name.
    #[must_use]
    pub fn for_input_shape(name: &str) -> Self {
        const FILTER_WORDS: [&str; 4] = ["Filter", "Where", "OrderBy", "Aggregate"];
        if FILTER_WORDS.iter().any(|word| name.contains(word)) {
            Self::Filter
        } else if name.contains("Update") {
            Self::Update
        } else {
            Self::Create
        }
    }

    /// Returns the kind of file a class of this mode lives in.
    #[must_use]
    pub const fn file_kind(&self) -> FileKind {
        match self {
            Self::Model => FileKind::Model,
            Self::Output => FileKind::Output,
            Self::Create | Self::Update | Self::Filter => FileKind::Input,
        }
    }

    /// Returns the class decorator of this mode.
    #[must_use]
    pub fn class_decorator<'c>(&self, names: &'c DecoratorNames) -> &'c str {
        match self {
            Self::Model => &names.model,
            Self::Output => &names.output,
            Self::Create | Self::Update | Self::Filter => &names.input,
        }
    }

    /// Decides whether a field is required.
    ///
    /// # Arguments
    /// * `declared` - Whether the model or shape declares the field required
    /// * `nullable` - Whether the winning representation accepts null
    /// * `underlying` - The model field behind the class field, if any
    #[must_use]
    pub fn is_required(
        &self,
        declared: bool,
        nullable: bool,
        underlying: Option<&ModelField>,
    ) -> bool {
        match self {
            Self::Model | Self::Output => declared && !nullable,
            Self::Create => {
                declared && !nullable && underlying.is_none_or(|f| !f.is_optional_on_create())
            }
            Self::Update | Self::Filter => false,
        }
    }
}

/// One emitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Property name.
    pub name: String,
    /// Printed type, wire marker and imports.
    pub resolved: ResolvedType,
    /// Whether the property is required.
    pub required: bool,
    /// Default value expression.
    pub default_value: Option<String>,
    /// Field description.
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Builds the field decorator.
    ///
    /// Options are emitted in the order `nullable`, `defaultValue`,
    /// `description`.
    #[must_use]
    pub fn decorator(&self, field_decorator: &str) -> DecoratorDecl {
        let mut options = vec![("nullable".to_string(), (!self.required).to_string())];
        if let Some(default_value) = &self.default_value {
            options.push(("defaultValue".to_string(), default_value.clone()));
        }
        if let Some(description) = &self.description {
            options.push(("description".to_string(), quote(description)));
        }
        DecoratorDecl::new(field_decorator)
            .arg(self.resolved.wire_expr())
            .object(options)
    }

    /// Builds the decorated property declaration.
    #[must_use]
    pub fn property(&self, field_decorator: &str) -> PropertyDecl {
        PropertyDecl {
            name: self.name.clone(),
            decorators: vec![self.decorator(field_decorator)],
            required: self.required,
            type_text: self.resolved.printed_type(),
        }
    }
}

/// A synthesized class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    /// Class name.
    pub name: String,
    /// Generation mode.
    pub mode: ClassMode,
    /// Location of the class file.
    pub class_ref: ClassRef,
    /// Class description.
    pub description: Option<String>,
    /// Fields in declared order.
    pub fields: Vec<FieldDescriptor>,
}

impl ClassDescriptor {
    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Builds the class decorator.
    #[must_use]
    pub fn class_decorator(&self, names: &DecoratorNames) -> DecoratorDecl {
        let options = self
            .description
            .iter()
            .map(|description| ("description".to_string(), quote(description)))
            .collect();
        DecoratorDecl::new(self.mode.class_decorator(names)).object(options)
    }

    /// Builds the full class declaration.
    #[must_use]
    pub fn class_decl(&self, names: &DecoratorNames) -> ClassDecl {
        ClassDecl {
            name: self.name.clone(),
            exported: true,
            decorators: vec![self.class_decorator(names)],
            properties: self
                .fields
                .iter()
                .map(|field| field.property(&names.field))
                .collect(),
        }
    }
}

/// What a class is synthesized from.
#[derive(Debug, Clone, Copy)]
pub enum ClassSource<'s> {
    /// An entity model.
    Model(&'s Model),
    /// An input or output shape.
    Shape(&'s ShapeDef),
}

impl ClassSource<'_> {
    /// Returns the class name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Model(model) => &model.name,
            Self::Shape(shape) => &shape.name,
        }
    }
}

/// Builds class descriptors from metadata.
#[derive(Debug, Clone, Copy)]
pub struct ClassSynthesizer<'a> {
    metadata: &'a Metadata,
    config: &'a Config,
    mapper: ScalarMapper<'a>,
    layout: ModuleLayout<'a>,
}

impl<'a> ClassSynthesizer<'a> {
    /// Creates a synthesizer.
    #[must_use]
    pub fn new(metadata: &'a Metadata, config: &'a Config) -> Self {
        Self {
            metadata,
            config,
            mapper: ScalarMapper::new(config),
            layout: ModuleLayout::new(metadata, config),
        }
    }

    /// Synthesizes a model class.
    ///
    /// # Errors
    /// Returns `CodegenError` if a field type cannot be mapped.
    pub fn synthesize_model(&self, model: &Model) -> Result<ClassDescriptor, CodegenError> {
        self.synthesize(ClassSource::Model(model), ClassMode::Model)
    }

    /// Synthesizes an input shape class, inferring its mode from the name.
    ///
    /// # Errors
    /// Returns `CodegenError` if a field has no alternatives or a type
    /// cannot be mapped.
    pub fn synthesize_input(&self, shape: &ShapeDef) -> Result<ClassDescriptor, CodegenError> {
        self.synthesize(ClassSource::Shape(shape), ClassMode::for_input_shape(&shape.name))
    }

    /// Synthesizes an output shape class.
    ///
    /// # Errors
    /// Returns `CodegenError` if a field has no alternatives or a type
    /// cannot be mapped.
    pub fn synthesize_output(&self, shape: &ShapeDef) -> Result<ClassDescriptor, CodegenError> {
        self.synthesize(ClassSource::Shape(shape), ClassMode::Output)
    }

    /// Synthesizes a class in the given mode.
    ///
    /// # Arguments
    /// * `source` - Model or shape to synthesize from
    /// * `mode` - Generation mode
    ///
    /// # Returns
    /// A descriptor with one field per distinct declared field, in declared order.
    ///
    /// # Errors
    /// Returns `CodegenError::Resolution` if a shape field has no
    /// alternatives and `CodegenError::UnknownType` if a scalar cannot be
    /// mapped.
    pub fn synthesize(
        &self,
        source: ClassSource<'_>,
        mode: ClassMode,
    ) -> Result<ClassDescriptor, CodegenError> {
        let name = source.name();
        let class_ref = self.layout.class_ref(name, mode.file_kind());
        let owner = match source {
            ClassSource::Model(model) => Some(model),
            ClassSource::Shape(shape) => self.metadata.owning_model(&shape.name),
        };

        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        let description = match source {
            ClassSource::Model(model) => documentation(model.documentation.as_deref()),
            ClassSource::Shape(_) => None,
        };

        match source {
            ClassSource::Model(model) => {
                for field in &model.fields {
                    if !seen.insert(field.name.as_str()) {
                        tracing::warn!("skipping duplicate field {}.{}", name, field.name);
                        continue;
                    }
                    fields.push(self.model_field(name, field, mode)?);
                }
            }
            ClassSource::Shape(shape) => {
                for field in &shape.fields {
                    if !seen.insert(field.name.as_str()) {
                        tracing::warn!("skipping duplicate field {}.{}", name, field.name);
                        continue;
                    }
                    let underlying = owner.and_then(|model| model.field(&field.name));
                    fields.push(self.shape_field(name, field, underlying, mode)?);
                }
            }
        }

        tracing::debug!("synthesized {} with {} fields", name, fields.len());
        Ok(ClassDescriptor {
            name: name.to_string(),
            mode,
            class_ref,
            description,
            fields,
        })
    }

    fn model_field(
        &self,
        class: &str,
        field: &ModelField,
        mode: ClassMode,
    ) -> Result<FieldDescriptor, CodegenError> {
        let nullable = !field.is_required;
        let mut resolved = match field.kind {
            FieldKind::Scalar => {
                self.mapper
                    .map_name(&field.type_name, &field.name, field.is_list, nullable)?
            }
            FieldKind::Enum => self.reference(class, &field.type_name, FileKind::Enum),
            FieldKind::Relation => self.reference(class, &field.type_name, FileKind::Model),
        }
        .with_list(field.is_list)
        .with_nullable(nullable);

        if field.is_id && mode == ClassMode::Model {
            let framework = self.config.decorators().module.clone();
            let wire = std::mem::replace(&mut resolved.wire, ID_MARKER.to_string());
            resolved.imports.retain(|import| import.name != wire);
            resolved
                .imports
                .push(ImportSpec::package(ID_MARKER, framework));
        }

        let default_value = match mode {
            ClassMode::Model | ClassMode::Create => transcribe_default(field),
            _ => None,
        };

        Ok(FieldDescriptor {
            name: field.name.clone(),
            required: mode.is_required(field.is_required, nullable, Some(field)),
            resolved,
            default_value,
            description: documentation(field.documentation.as_deref()),
        })
    }

    fn shape_field(
        &self,
        class: &str,
        field: &ShapeField,
        underlying: Option<&ModelField>,
        mode: ClassMode,
    ) -> Result<FieldDescriptor, CodegenError> {
        let resolution = TypeResolver::resolve(&field.alternatives)
            .ok_or_else(|| CodegenError::resolution(class, &field.name))?;
        let winner = &resolution.alternative;
        let nullable = resolution.nullable;

        let resolved = match winner.category {
            TypeCategory::Scalar => {
                self.mapper
                    .map_name(&winner.name, &field.name, winner.is_list, nullable)?
            }
            TypeCategory::Enum => self.reference(class, &winner.name, FileKind::Enum),
            TypeCategory::RelationFilterObject
            | TypeCategory::WholeEntityFilterObject
            | TypeCategory::PlainObject => {
                let kind = match self.metadata.definition(&winner.name) {
                    Some(Definition::Model(_)) => FileKind::Model,
                    Some(Definition::Enum(_)) => FileKind::Enum,
                    Some(Definition::OutputShape(_)) => FileKind::Output,
                    Some(Definition::InputShape(_)) => FileKind::Input,
                    None if mode == ClassMode::Output => FileKind::Output,
                    None => FileKind::Input,
                };
                self.reference(class, &winner.name, kind)
            }
        }
        .with_list(winner.is_list)
        .with_nullable(nullable);

        let default_value = match mode {
            ClassMode::Create => underlying.and_then(transcribe_default),
            _ => None,
        };

        Ok(FieldDescriptor {
            name: field.name.clone(),
            required: mode.is_required(field.is_required, nullable, underlying),
            resolved,
            default_value,
            description: underlying.and_then(|f| documentation(f.documentation.as_deref())),
        })
    }

    /// Type naming another generated class or enum; self-references carry no import.
    fn reference(&self, class: &str, target: &str, kind: FileKind) -> ResolvedType {
        let resolved = ResolvedType::named(target);
        if target == class {
            return resolved;
        }
        resolved.with_import(ImportSpec::generated(self.layout.class_ref(target, kind)))
    }
}

/// Returns trimmed documentation, or `None` when there is none.
fn documentation(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

/// Transcribes a model default literal into an expression.
///
/// Text-like scalars become string literals unless already quoted, enum
/// defaults become `Enum.VALUE`, other literals pass through.
fn transcribe_default(field: &ModelField) -> Option<String> {
    if field.is_generated {
        return None;
    }
    let literal = field.default_literal.as_deref()?.trim();
    if literal.is_empty() {
        return None;
    }

    match field.kind {
        FieldKind::Relation => None,
        FieldKind::Enum => Some(format!("{}.{}", field.type_name, unquote(literal))),
        FieldKind::Scalar => {
            let text_like = field
                .type_name
                .parse::<ScalarKind>()
                .is_ok_and(|kind| kind.is_text_like());
            if text_like && unquote(literal) == literal {
                Some(quote(literal))
            } else {
                Some(literal.to_string())
            }
        }
    }
}

fn unquote(literal: &str) -> &str {
    for mark in ['"', '\''] {
        if let Some(inner) = literal
            .strip_prefix(mark)
            .and_then(|rest| rest.strip_suffix(mark))
        {
            return inner;
        }
    }
    literal
}

/// Renders a double-quoted string literal.
pub(crate) fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlsmith_schema::{EnumDef, FieldAlternative, parse_metadata};

    fn metadata() -> Metadata {
        parse_metadata(
            r#"{
  "models": [
    {
      "name": "User",
      "documentation": "A registered user",
      "fields": [
        { "name": "id", "kind": "scalar", "type": "String", "isRequired": true, "isId": true, "hasDefault": true, "isGenerated": true },
        { "name": "email", "kind": "scalar", "type": "String", "isRequired": true, "documentation": "Login \"email\"" },
        { "name": "name", "kind": "scalar", "type": "String" },
        { "name": "role", "kind": "enum", "type": "Role", "isRequired": true, "hasDefault": true, "defaultLiteral": "USER" },
        { "name": "score", "kind": "scalar", "type": "Float", "isRequired": true, "hasDefault": true, "defaultLiteral": "1.5" },
        { "name": "bio", "kind": "scalar", "type": "String", "hasDefault": true, "defaultLiteral": "none" },
        { "name": "posts", "kind": "relation", "type": "Post", "isList": true, "isRequired": true },
        { "name": "manager", "kind": "relation", "type": "User" },
        { "name": "birth", "kind": "scalar", "type": "DateTime" }
      ]
    },
    { "name": "Post", "fields": [ { "name": "id", "kind": "scalar", "type": "Int", "isRequired": true, "isId": true } ] }
  ],
  "enums": [ { "name": "Role", "values": ["USER", "ADMIN"] } ],
  "inputShapes": [
    {
      "name": "UserCreateInput",
      "fields": [
        { "name": "email", "isRequired": true, "alternatives": [ { "name": "String", "category": "scalar" } ] },
        { "name": "role", "isRequired": true, "alternatives": [ { "name": "Role", "category": "enum" } ] },
        { "name": "name", "isRequired": false, "alternatives": [ { "name": "String", "category": "scalar" }, { "name": "Null", "category": "scalar" } ] }
      ]
    },
    {
      "name": "UserWhereInput",
      "fields": [
        { "name": "AND", "alternatives": [ { "name": "UserWhereInput", "category": "plainObject", "isList": true } ] },
        { "name": "email", "alternatives": [ { "name": "StringFilter", "category": "plainObject" }, { "name": "String", "category": "scalar" } ] },
        { "name": "birth", "alternatives": [ { "name": "DateTimeFilter", "category": "plainObject" }, { "name": "DateTime", "category": "scalar" } ] },
        { "name": "manager", "alternatives": [ { "name": "UserRelationFilter", "category": "relationFilterObject" }, { "name": "UserWhereInput", "category": "wholeEntityFilterObject" } ] }
      ]
    },
    {
      "name": "DateTimeFilter",
      "fields": [
        { "name": "in", "alternatives": [ { "name": "DateTime", "category": "scalar", "isList": true } ] }
      ]
    },
    { "name": "BrokenInput", "fields": [ { "name": "ghost", "alternatives": [] } ] }
  ],
  "outputShapes": [
    {
      "name": "UserCountOutput",
      "fields": [ { "name": "posts", "isRequired": true, "alternatives": [ { "name": "Int", "category": "scalar" } ] } ]
    }
  ]
}"#,
        )
        .expect("Failed to parse")
    }

    fn synthesize_model(metadata: &Metadata, name: &str) -> ClassDescriptor {
        let config = Config::new();
        let model = metadata.model(name).expect("model");
        ClassSynthesizer::new(metadata, &config)
            .synthesize_model(model)
            .expect("synthesized")
    }

    fn synthesize_input(metadata: &Metadata, name: &str) -> ClassDescriptor {
        let config = Config::new();
        let shape = metadata.input_shape(name).expect("shape");
        ClassSynthesizer::new(metadata, &config)
            .synthesize_input(shape)
            .expect("synthesized")
    }

    #[test]
    fn test_mode_inference() {
        assert_eq!(ClassMode::for_input_shape("UserCreateInput"), ClassMode::Create);
        assert_eq!(ClassMode::for_input_shape("UserUpdateInput"), ClassMode::Update);
        assert_eq!(ClassMode::for_input_shape("UserWhereUniqueInput"), ClassMode::Filter);
        assert_eq!(ClassMode::for_input_shape("IntFilter"), ClassMode::Filter);
        assert_eq!(
            ClassMode::for_input_shape("UserOrderByWithAggregationInput"),
            ClassMode::Filter
        );
    }

    #[test]
    fn test_model_field_order_and_required() {
        let metadata = metadata();
        let class = synthesize_model(&metadata, "User");
        let names: Vec<&str> = class.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["id", "email", "name", "role", "score", "bio", "posts", "manager", "birth"]
        );
        assert!(class.field("email").unwrap().required);
        assert!(!class.field("name").unwrap().required);
        assert!(class.field("id").unwrap().required);
        assert_eq!(class.description.as_deref(), Some("A registered user"));
        assert_eq!(class.class_ref.kind, FileKind::Model);
    }

    #[test]
    fn test_model_id_uses_id_marker() {
        let metadata = metadata();
        let class = synthesize_model(&metadata, "User");
        let id = class.field("id").unwrap();
        assert_eq!(id.resolved.wire_expr(), "() => ID");
        assert_eq!(id.resolved.printed_type(), "string");
        assert_eq!(id.resolved.imports, vec![ImportSpec::package("ID", "@nestjs/graphql")]);

        let post = synthesize_model(&metadata, "Post");
        assert_eq!(
            post.field("id").unwrap().resolved.imports,
            vec![ImportSpec::package("ID", "@nestjs/graphql")]
        );
    }

    #[test]
    fn test_relations_and_self_reference() {
        let metadata = metadata();
        let class = synthesize_model(&metadata, "User");

        let posts = class.field("posts").unwrap();
        assert_eq!(posts.resolved.printed_type(), "Array<Post>");
        assert_eq!(posts.resolved.wire_expr(), "() => [Post]");
        assert_eq!(posts.resolved.imports.len(), 1);

        let manager = class.field("manager").unwrap();
        assert_eq!(manager.resolved.printed_type(), "User");
        assert!(manager.resolved.imports.is_empty());
    }

    #[test]
    fn test_defaults_and_descriptions() {
        let metadata = metadata();
        let class = synthesize_model(&metadata, "User");
        assert_eq!(class.field("role").unwrap().default_value.as_deref(), Some("Role.USER"));
        assert_eq!(class.field("score").unwrap().default_value.as_deref(), Some("1.5"));
        assert_eq!(class.field("bio").unwrap().default_value.as_deref(), Some("\"none\""));
        assert!(class.field("id").unwrap().default_value.is_none());
        assert!(class.field("name").unwrap().description.is_none());

        let decorator = class.field("email").unwrap().decorator("Field");
        assert_eq!(
            decorator,
            DecoratorDecl::new("Field").arg("() => String").object(vec![
                ("nullable".to_string(), "false".to_string()),
                ("description".to_string(), "\"Login \\\"email\\\"\"".to_string()),
            ])
        );
    }

    #[test]
    fn test_create_input_required() {
        let metadata = metadata();
        let class = synthesize_input(&metadata, "UserCreateInput");
        assert_eq!(class.mode, ClassMode::Create);
        assert!(class.field("email").unwrap().required);
        // defaulted in the model
        assert!(!class.field("role").unwrap().required);
        assert!(!class.field("name").unwrap().required);
        assert!(class.field("name").unwrap().resolved.nullable);
        assert_eq!(class.field("role").unwrap().default_value.as_deref(), Some("Role.USER"));
        assert_eq!(class.class_ref.entity, "user");
    }

    #[test]
    fn test_filter_input_fields() {
        let metadata = metadata();
        let class = synthesize_input(&metadata, "UserWhereInput");
        assert_eq!(class.mode, ClassMode::Filter);
        assert!(class.fields.iter().all(|f| !f.required));

        let and = class.field("AND").unwrap();
        assert_eq!(and.resolved.printed_type(), "Array<UserWhereInput>");
        assert!(and.resolved.imports.is_empty());

        let email = class.field("email").unwrap();
        assert_eq!(email.resolved.printed_type(), "StringFilter");
        assert_eq!(email.resolved.imports[0].name, "StringFilter");

        let manager = class.field("manager").unwrap();
        assert_eq!(manager.resolved.printed_type(), "UserWhereInput");
    }

    #[test]
    fn test_date_time_list_union() {
        let metadata = metadata();
        let class = synthesize_input(&metadata, "DateTimeFilter");
        let field = class.field("in").unwrap();
        assert_eq!(field.resolved.printed_type(), "Array<Date> | Array<string>");
        assert_eq!(class.class_ref.entity, "prisma");

        let user = synthesize_model(&metadata, "User");
        assert_eq!(user.field("birth").unwrap().resolved.printed_type(), "Date | string");
    }

    #[test]
    fn test_output_shape() {
        let metadata = metadata();
        let config = Config::new();
        let shape = metadata.output_shape("UserCountOutput").unwrap();
        let class = ClassSynthesizer::new(&metadata, &config)
            .synthesize_output(shape)
            .expect("synthesized");
        assert_eq!(class.mode, ClassMode::Output);
        assert!(class.field("posts").unwrap().required);
        assert_eq!(class.class_decorator(config.decorators()), DecoratorDecl::new("ObjectType"));
    }

    #[test]
    fn test_resolution_error() {
        let metadata = metadata();
        let config = Config::new();
        let shape = metadata.input_shape("BrokenInput").unwrap();
        let err = ClassSynthesizer::new(&metadata, &config)
            .synthesize_input(shape)
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Resolution { ref class, ref field } if class == "BrokenInput" && field == "ghost"
        ));
    }

    #[test]
    fn test_unknown_scalar() {
        let mut metadata = Metadata::new();
        metadata.add_model(
            Model::new("Place").with_field(ModelField::scalar("area", "Geometry").required()),
        );
        let config = Config::new();
        let err = ClassSynthesizer::new(&metadata, &config)
            .synthesize_model(&metadata.models[0])
            .unwrap_err();
        assert!(matches!(err, CodegenError::UnknownType { .. }));
    }

    #[test]
    fn test_duplicate_fields_skipped() {
        let mut metadata = Metadata::new();
        metadata.add_enum(EnumDef::new("Role", ["A"]));
        metadata.add_input_shape(
            ShapeDef::new("RoleFilter")
                .with_field(ShapeField::new(
                    "equals",
                    vec![FieldAlternative::new("Role", TypeCategory::Enum)],
                ))
                .with_field(ShapeField::new(
                    "equals",
                    vec![FieldAlternative::scalar("String")],
                )),
        );
        let class = synthesize_input(&metadata, "RoleFilter");
        assert_eq!(class.fields.len(), 1);
        assert_eq!(class.fields[0].resolved.printed_type(), "Role");
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let metadata = metadata();
        assert_eq!(
            synthesize_model(&metadata, "User"),
            synthesize_model(&metadata, "User")
        );
    }

    #[test]
    fn test_class_decl() {
        let metadata = metadata();
        let config = Config::new();
        let class = synthesize_model(&metadata, "User");
        let decl = class.class_decl(config.decorators());
        assert!(decl.exported);
        assert_eq!(decl.properties.len(), class.fields.len());
        assert_eq!(decl.properties[0].decorators[0].name, "Field");
        assert_eq!(
            decl.decorators[0],
            DecoratorDecl::new("ObjectType").object(vec![(
                "description".to_string(),
                "\"A registered user\"".to_string()
            )])
        );
    }
}
