//! Metadata document definitions.
//!
//! This module contains the data structures describing the entity model:
//! models with their fields, enums, and the auxiliary input and output shapes
//! whose fields offer one or more candidate wire representations.

use crate::naming::is_word_prefix;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete metadata document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Entity models, in declaration order.
    #[serde(default)]
    pub models: Vec<Model>,
    /// Input shape definitions.
    #[serde(default)]
    pub input_shapes: Vec<ShapeDef>,
    /// Output shape definitions.
    #[serde(default)]
    pub output_shapes: Vec<ShapeDef>,
    /// Enum definitions.
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    /// Name lookup map (built after loading).
    #[serde(skip)]
    index: HashMap<String, Definition>,
}

/// Location of a named definition inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    /// Index into `models`.
    Model(usize),
    /// Index into `enums`.
    Enum(usize),
    /// Index into `input_shapes`.
    InputShape(usize),
    /// Index into `output_shapes`.
    OutputShape(usize),
}

impl Metadata {
    /// Creates a new empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a model to the document.
    pub fn add_model(&mut self, model: Model) {
        self.index
            .insert(model.name.clone(), Definition::Model(self.models.len()));
        self.models.push(model);
    }

    /// Adds an enum to the document.
    pub fn add_enum(&mut self, enum_def: EnumDef) {
        self.index
            .insert(enum_def.name.clone(), Definition::Enum(self.enums.len()));
        self.enums.push(enum_def);
    }

    /// Adds an input shape to the document.
    pub fn add_input_shape(&mut self, shape: ShapeDef) {
        self.index.insert(
            shape.name.clone(),
            Definition::InputShape(self.input_shapes.len()),
        );
        self.input_shapes.push(shape);
    }

    /// Adds an output shape to the document.
    pub fn add_output_shape(&mut self, shape: ShapeDef) {
        self.index.insert(
            shape.name.clone(),
            Definition::OutputShape(self.output_shapes.len()),
        );
        self.output_shapes.push(shape);
    }

    /// Builds the name lookup map from the definition vectors.
    ///
    /// Later definitions shadow earlier ones with the same name.
    pub fn build_index(&mut self) {
        self.index.clear();
        for (idx, shape) in self.input_shapes.iter().enumerate() {
            self.index
                .insert(shape.name.clone(), Definition::InputShape(idx));
        }
        for (idx, shape) in self.output_shapes.iter().enumerate() {
            self.index
                .insert(shape.name.clone(), Definition::OutputShape(idx));
        }
        for (idx, enum_def) in self.enums.iter().enumerate() {
            self.index.insert(enum_def.name.clone(), Definition::Enum(idx));
        }
        for (idx, model) in self.models.iter().enumerate() {
            self.index.insert(model.name.clone(), Definition::Model(idx));
        }
    }

    /// Looks up where a name is defined.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<Definition> {
        self.index.get(name).copied()
    }

    /// Looks up a model by name.
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        match self.definition(name)? {
            Definition::Model(idx) => self.models.get(idx),
            _ => None,
        }
    }

    /// Looks up an enum by name.
    #[must_use]
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        match self.definition(name)? {
            Definition::Enum(idx) => self.enums.get(idx),
            _ => None,
        }
    }

    /// Looks up an input shape by name.
    #[must_use]
    pub fn input_shape(&self, name: &str) -> Option<&ShapeDef> {
        match self.definition(name)? {
            Definition::InputShape(idx) => self.input_shapes.get(idx),
            _ => None,
        }
    }

    /// Looks up an output shape by name.
    #[must_use]
    pub fn output_shape(&self, name: &str) -> Option<&ShapeDef> {
        match self.definition(name)? {
            Definition::OutputShape(idx) => self.output_shapes.get(idx),
            _ => None,
        }
    }

    /// Returns the model that owns a class name.
    ///
    /// The owner is the longest model name that prefixes `class_name` at a
    /// word boundary, so `UserWhereInput` belongs to `User` and not to `Use`.
    #[must_use]
    pub fn owning_model(&self, class_name: &str) -> Option<&Model> {
        self.models
            .iter()
            .filter(|model| is_word_prefix(&model.name, class_name))
            .max_by_key(|model| model.name.len())
    }
}

/// Entity model definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Model name.
    pub name: String,
    /// Leading documentation comment.
    #[serde(default)]
    pub documentation: Option<String>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<ModelField>,
}

impl Model {
    /// Creates a new model without fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documentation: None,
            fields: Vec::new(),
        }
    }

    /// Adds a field to the model.
    #[must_use]
    pub fn with_field(mut self, field: ModelField) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Kind of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Primitive scalar value.
    Scalar,
    /// Reference to another model.
    #[serde(alias = "object")]
    Relation,
    /// Reference to an enum.
    Enum,
}

/// Model field definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelField {
    /// Field name.
    pub name: String,
    /// Leading documentation comment.
    #[serde(default)]
    pub documentation: Option<String>,
    /// Field kind.
    pub kind: FieldKind,
    /// Scalar kind name, or the referenced model or enum name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the field holds a list.
    #[serde(default)]
    pub is_list: bool,
    /// Whether the field is non-nullable.
    #[serde(default)]
    pub is_required: bool,
    /// Whether the field declares a default value.
    #[serde(default)]
    pub has_default: bool,
    /// Default value literal, when it is a plain value.
    #[serde(default)]
    pub default_literal: Option<String>,
    /// Whether the field is the model identifier.
    #[serde(default)]
    pub is_id: bool,
    /// Whether the value is produced by the server.
    #[serde(default)]
    pub is_generated: bool,
}

impl ModelField {
    /// Creates a field of the given kind and type.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documentation: None,
            kind,
            type_name: type_name.into(),
            is_list: false,
            is_required: false,
            has_default: false,
            default_literal: None,
            is_id: false,
            is_generated: false,
        }
    }

    /// Creates a scalar field.
    #[must_use]
    pub fn scalar(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Scalar, type_name)
    }

    /// Marks the field as non-nullable.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Marks the field as a list.
    #[must_use]
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Marks the field as the model identifier.
    #[must_use]
    pub fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    /// Returns true if the field may be left out when creating a record.
    #[must_use]
    pub fn is_optional_on_create(&self) -> bool {
        !self.is_required || self.has_default || self.is_generated
    }
}

/// Category of a candidate wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeCategory {
    /// Primitive scalar.
    Scalar,
    /// Enum reference.
    Enum,
    /// Structured filter scoped to a relation.
    RelationFilterObject,
    /// Structured filter over every field of the related entity.
    WholeEntityFilterObject,
    /// Any other structured object.
    PlainObject,
}

/// One candidate wire representation of a shape field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAlternative {
    /// Symbolic type name.
    #[serde(alias = "type")]
    pub name: String,
    /// Representation category.
    pub category: TypeCategory,
    /// Whether the representation is a list.
    #[serde(default)]
    pub is_list: bool,
    /// Whether the representation accepts null.
    #[serde(default)]
    pub is_null: bool,
}

impl FieldAlternative {
    /// Symbolic name of the scalar that denotes absence of a value.
    pub const NULL_MARKER: &'static str = "Null";

    /// Creates a non-list, non-null alternative.
    #[must_use]
    pub fn new(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
            is_list: false,
            is_null: false,
        }
    }

    /// Creates a scalar alternative.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, TypeCategory::Scalar)
    }

    /// Marks the alternative as a list.
    #[must_use]
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Returns true if this alternative only expresses "no value".
    #[must_use]
    pub fn is_null_marker(&self) -> bool {
        self.category == TypeCategory::Scalar && self.name == Self::NULL_MARKER
    }
}

/// Input or output shape definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDef {
    /// Shape name.
    pub name: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<ShapeField>,
}

impl ShapeDef {
    /// Creates a new shape without fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the shape.
    #[must_use]
    pub fn with_field(mut self, field: ShapeField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Shape field definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeField {
    /// Field name.
    pub name: String,
    /// Whether the field must be supplied.
    #[serde(default)]
    pub is_required: bool,
    /// Candidate representations, in listed order.
    #[serde(default)]
    pub alternatives: Vec<FieldAlternative>,
}

impl ShapeField {
    /// Creates an optional field with the given alternatives.
    #[must_use]
    pub fn new(name: impl Into<String>, alternatives: Vec<FieldAlternative>) -> Self {
        Self {
            name: name.into(),
            is_required: false,
            alternatives,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// Enum definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Leading documentation comment.
    #[serde(default)]
    pub documentation: Option<String>,
    /// Member names in declaration order.
    #[serde(default)]
    pub values: Vec<String>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            documentation: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_metadata() -> Metadata {
        let mut metadata = Metadata::new();
        metadata.add_model(
            Model::new("User").with_field(ModelField::scalar("id", "String").required().id()),
        );
        metadata.add_model(Model::new("UserProfile"));
        metadata.add_enum(EnumDef::new("Role", ["USER", "ADMIN"]));
        metadata.add_input_shape(ShapeDef::new("UserWhereInput"));
        metadata.add_output_shape(ShapeDef::new("UserCountAggregate"));
        metadata
    }

    #[test]
    fn test_metadata_lookup() {
        let metadata = create_test_metadata();
        assert!(metadata.model("User").is_some());
        assert!(metadata.enum_def("Role").is_some());
        assert!(metadata.input_shape("UserWhereInput").is_some());
        assert!(metadata.output_shape("UserCountAggregate").is_some());
        assert!(metadata.model("Role").is_none());
        assert_eq!(metadata.definition("Missing"), None);
    }

    #[test]
    fn test_build_index_after_direct_push() {
        let mut metadata = Metadata::new();
        metadata.models.push(Model::new("Post"));
        assert!(metadata.model("Post").is_none());
        metadata.build_index();
        assert_eq!(metadata.definition("Post"), Some(Definition::Model(0)));
    }

    #[test]
    fn test_owning_model_prefers_longest_word_prefix() {
        let metadata = create_test_metadata();
        assert_eq!(
            metadata.owning_model("UserWhereInput").map(|m| m.name.as_str()),
            Some("User")
        );
        assert_eq!(
            metadata
                .owning_model("UserProfileCreateInput")
                .map(|m| m.name.as_str()),
            Some("UserProfile")
        );
        assert!(metadata.owning_model("Username").is_none());
        assert!(metadata.owning_model("StringFilter").is_none());
    }

    #[test]
    fn test_null_marker() {
        assert!(FieldAlternative::scalar("Null").is_null_marker());
        assert!(!FieldAlternative::scalar("String").is_null_marker());
        assert!(!FieldAlternative::new("Null", TypeCategory::PlainObject).is_null_marker());
    }

    #[test]
    fn test_optional_on_create() {
        let field = ModelField::scalar("name", "String").required();
        assert!(!field.is_optional_on_create());

        let mut defaulted = field.clone();
        defaulted.has_default = true;
        assert!(defaulted.is_optional_on_create());

        let mut generated = field;
        generated.is_generated = true;
        assert!(generated.is_optional_on_create());

        assert!(ModelField::scalar("bio", "String").is_optional_on_create());
    }
}
