//! Synthetic metadata documents.

use gqlsmith_schema::{
    EnumDef, FieldAlternative, FieldKind, Metadata, Model, ModelField, ShapeDef, ShapeField,
    TypeCategory,
};

const SCALARS: [&str; 6] = ["String", "Int", "Float", "Boolean", "DateTime", "Json"];

/// Builds a document with `models` models of `fields` scalar fields each.
///
/// Every model also gets a relation to the previous model, an enum field,
/// a create input and a filter input.
#[must_use]
pub fn sample_metadata(models: usize, fields: usize) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.add_enum(EnumDef::new("Status", ["ACTIVE", "ARCHIVED"]));

    for index in 0..models {
        let name = format!("Entity{index}");
        let mut model = Model::new(&name)
            .with_field(ModelField::scalar("id", "Int").required().id())
            .with_field(ModelField::new("status", FieldKind::Enum, "Status").required());
        if index > 0 {
            model = model.with_field(ModelField::new(
                "parent",
                FieldKind::Relation,
                format!("Entity{}", index - 1),
            ));
        }

        let mut create = ShapeDef::new(format!("{name}CreateInput"));
        let mut filter = ShapeDef::new(format!("{name}WhereInput"));
        for field in 0..fields {
            let scalar = SCALARS[field % SCALARS.len()];
            let field_name = format!("field{field}");
            model = model.with_field(ModelField::scalar(&field_name, scalar));
            create = create.with_field(ShapeField::new(
                &field_name,
                vec![FieldAlternative::scalar(scalar)],
            ));
            filter = filter.with_field(ShapeField::new(
                &field_name,
                vec![
                    FieldAlternative::new(format!("{scalar}Filter"), TypeCategory::PlainObject),
                    FieldAlternative::scalar(scalar),
                    FieldAlternative::scalar(FieldAlternative::NULL_MARKER),
                ],
            ));
        }

        metadata.add_model(model);
        metadata.add_input_shape(create);
        metadata.add_input_shape(filter);
    }

    metadata
}
