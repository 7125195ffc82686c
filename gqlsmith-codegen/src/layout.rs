//! Module layout of generated files.

use crate::config::Config;
use gqlsmith_schema::Metadata;
use gqlsmith_schema::naming::{strip_suffix_word, to_kebab_case};
use std::fmt;

/// Entity directory for classes no model owns.
pub const SHARED_ENTITY: &str = "prisma";

/// Kind of generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileKind {
    /// Entity model object type.
    Model,
    /// Input shape.
    Input,
    /// Output shape.
    Output,
    /// Enum definition.
    Enum,
}

impl FileKind {
    /// Returns the kind tag used in file names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Input => "input",
            Self::Output => "output",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated class or enum and the entity directory it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassRef {
    /// Class name.
    pub name: String,
    /// File kind.
    pub kind: FileKind,
    /// Kebab-cased owning entity.
    pub entity: String,
}

impl ClassRef {
    /// Creates a class reference.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FileKind, entity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            entity: entity.into(),
        }
    }
}

/// Returns `<entity>/<kebab-name>.<kind>.ts`.
///
/// A trailing `Input` or `Output` word is dropped from input and output
/// class names, so `UserWhereInput` becomes `user/user-where.input.ts`.
#[must_use]
pub fn default_file_path(class: &ClassRef) -> String {
    let stem = match class.kind {
        FileKind::Input => strip_suffix_word(&class.name, "Input"),
        FileKind::Output => strip_suffix_word(&class.name, "Output"),
        FileKind::Model | FileKind::Enum => class.name.as_str(),
    };
    format!("{}/{}.{}.ts", class.entity, to_kebab_case(stem), class.kind)
}

/// Returns the module specifier that imports `to` from a file at `from`.
///
/// Both paths are relative to the output base path; the `.ts` extension is
/// dropped from the target.
#[must_use]
pub fn relative_specifier(from: &str, to: &str) -> String {
    let to = to.strip_suffix(".ts").unwrap_or(to);
    let from_dirs: Vec<&str> = from.split('/').collect();
    let from_dirs = &from_dirs[..from_dirs.len().saturating_sub(1)];
    let to_parts: Vec<&str> = to.split('/').collect();

    let common = from_dirs
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count()
        .min(to_parts.len().saturating_sub(1));

    let ups = from_dirs.len() - common;
    let rest = to_parts[common..].join("/");
    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}

/// Resolves class references and file paths for a metadata document.
#[derive(Debug, Clone, Copy)]
pub struct ModuleLayout<'a> {
    metadata: &'a Metadata,
    config: &'a Config,
}

impl<'a> ModuleLayout<'a> {
    /// Creates a layout.
    #[must_use]
    pub fn new(metadata: &'a Metadata, config: &'a Config) -> Self {
        Self { metadata, config }
    }

    /// Builds the reference of a named class of the given kind.
    #[must_use]
    pub fn class_ref(&self, name: &str, kind: FileKind) -> ClassRef {
        let entity = match kind {
            FileKind::Model => to_kebab_case(name),
            FileKind::Enum => SHARED_ENTITY.to_string(),
            FileKind::Input | FileKind::Output => self
                .metadata
                .owning_model(name)
                .map_or_else(|| SHARED_ENTITY.to_string(), |m| to_kebab_case(&m.name)),
        };
        ClassRef::new(name, kind, entity)
    }

    /// Returns the file path of a class.
    #[must_use]
    pub fn path(&self, class: &ClassRef) -> String {
        self.config.file_path(class)
    }

    /// Returns the module specifier importing `to` from the file of `from`.
    #[must_use]
    pub fn specifier(&self, from: &ClassRef, to: &ClassRef) -> String {
        relative_specifier(&self.path(from), &self.path(to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlsmith_schema::Model;

    #[test]
    fn test_default_file_path() {
        assert_eq!(
            default_file_path(&ClassRef::new("User", FileKind::Model, "user")),
            "user/user.model.ts"
        );
        assert_eq!(
            default_file_path(&ClassRef::new("Role", FileKind::Enum, SHARED_ENTITY)),
            "prisma/role.enum.ts"
        );
        assert_eq!(
            default_file_path(&ClassRef::new("IntFilter", FileKind::Input, SHARED_ENTITY)),
            "prisma/int-filter.input.ts"
        );
        assert_eq!(
            default_file_path(&ClassRef::new("Input", FileKind::Input, SHARED_ENTITY)),
            "prisma/input.input.ts"
        );
    }

    #[test]
    fn test_relative_specifier() {
        assert_eq!(
            relative_specifier("user/user.model.ts", "post/post.model.ts"),
            "../post/post.model"
        );
        assert_eq!(
            relative_specifier("user/user.model.ts", "user/user-where.input.ts"),
            "./user-where.input"
        );
        assert_eq!(
            relative_specifier("user.ts", "prisma/role.enum.ts"),
            "./prisma/role.enum"
        );
        assert_eq!(relative_specifier("a/b/c.ts", "a/d.ts"), "../d");
    }

    #[test]
    fn test_class_ref_entity() {
        let mut metadata = Metadata::new();
        metadata.add_model(Model::new("User"));
        metadata.add_model(Model::new("UserProfile"));
        let config = Config::new();
        let layout = ModuleLayout::new(&metadata, &config);

        assert_eq!(layout.class_ref("UserWhereInput", FileKind::Input).entity, "user");
        assert_eq!(
            layout
                .class_ref("UserProfileCreateInput", FileKind::Input)
                .entity,
            "user-profile"
        );
        assert_eq!(layout.class_ref("IntFilter", FileKind::Input).entity, "prisma");
        assert_eq!(layout.class_ref("Role", FileKind::Enum).entity, "prisma");

        let from = layout.class_ref("User", FileKind::Model);
        let to = layout.class_ref("Role", FileKind::Enum);
        assert_eq!(layout.specifier(&from, &to), "../prisma/role.enum");
    }
}
