//! Import planning.

use crate::class::{ClassDescriptor, FieldDescriptor};
use crate::config::Config;
use crate::layout::ModuleLayout;
use crate::scalar::{ImportSource, ImportSpec};
use gqlsmith_schema::Metadata;
use gqlsmith_syntax::{ClassView, NamedImport};
use std::collections::BTreeSet;

/// Computes the import set of a class file.
///
/// A planned import is always referenced by the class decorator or by a
/// field, and never names the class itself.
#[derive(Debug, Clone, Copy)]
pub struct ImportPlanner<'a> {
    config: &'a Config,
    layout: ModuleLayout<'a>,
}

impl<'a> ImportPlanner<'a> {
    /// Creates a planner.
    #[must_use]
    pub fn new(metadata: &'a Metadata, config: &'a Config) -> Self {
        Self {
            config,
            layout: ModuleLayout::new(metadata, config),
        }
    }

    /// Turns an import requirement into a named import of the class file.
    #[must_use]
    pub fn named_import(&self, class: &ClassDescriptor, spec: &ImportSpec) -> NamedImport {
        match &spec.source {
            ImportSource::Package(module) => NamedImport::new(&spec.name, module),
            ImportSource::Generated(target) => {
                NamedImport::new(&spec.name, self.layout.specifier(&class.class_ref, target))
            }
        }
    }

    /// Imports needed by the class decorator.
    #[must_use]
    pub fn class_imports(&self, class: &ClassDescriptor) -> BTreeSet<NamedImport> {
        let names = self.config.decorators();
        BTreeSet::from([NamedImport::new(
            class.mode.class_decorator(names),
            &names.module,
        )])
    }

    /// Imports needed by one field: its decorator and its resolved type.
    #[must_use]
    pub fn field_imports(
        &self,
        class: &ClassDescriptor,
        field: &FieldDescriptor,
    ) -> BTreeSet<NamedImport> {
        let names = self.config.decorators();
        let mut imports = BTreeSet::from([NamedImport::new(&names.field, &names.module)]);
        imports.extend(
            field
                .resolved
                .imports
                .iter()
                .filter(|spec| spec.name != class.name)
                .map(|spec| self.named_import(class, spec)),
        );
        imports
    }

    /// Imports of a class emitted whole.
    #[must_use]
    pub fn plan(&self, class: &ClassDescriptor) -> BTreeSet<NamedImport> {
        let mut imports = self.class_imports(class);
        for field in &class.fields {
            imports.extend(self.field_imports(class, field));
        }
        imports
    }

    /// Imports of an existing class kept in place, plus the fields appended to it.
    ///
    /// Identifiers the kept class references keep their existing import; an
    /// identifier with no existing import takes the planned one, if any.
    #[must_use]
    pub fn plan_retained(
        &self,
        class: &ClassDescriptor,
        view: &ClassView,
        appended: &[&FieldDescriptor],
        existing: &[NamedImport],
    ) -> BTreeSet<NamedImport> {
        let full = self.plan(class);
        let mut imports = BTreeSet::new();

        for name in &view.references {
            let kept: Vec<&NamedImport> = existing.iter().filter(|i| &i.name == name).collect();
            if kept.is_empty() {
                imports.extend(full.iter().filter(|i| &i.name == name).cloned());
            } else {
                imports.extend(kept.into_iter().cloned());
            }
        }

        for field in appended {
            for import in self.field_imports(class, field) {
                insert_unique(&mut imports, import);
            }
        }

        imports.retain(|import| import.name != class.name);
        imports
    }

    /// Existing imports referenced by content outside the managed class.
    #[must_use]
    pub fn preserved(
        existing: &[NamedImport],
        outside: &BTreeSet<String>,
    ) -> BTreeSet<NamedImport> {
        existing
            .iter()
            .filter(|import| outside.contains(&import.name))
            .cloned()
            .collect()
    }

    /// Combines preserved and planned imports; a preserved name shadows a
    /// planned import of the same name.
    #[must_use]
    pub fn combine(
        preserved: BTreeSet<NamedImport>,
        planned: BTreeSet<NamedImport>,
    ) -> BTreeSet<NamedImport> {
        let mut imports = preserved;
        for import in planned {
            insert_unique(&mut imports, import);
        }
        imports
    }

    /// Existing imports absent from the final set.
    #[must_use]
    pub fn stale_imports(
        existing: &[NamedImport],
        required: &BTreeSet<NamedImport>,
    ) -> Vec<NamedImport> {
        existing
            .iter()
            .filter(|import| !required.contains(*import))
            .cloned()
            .collect()
    }
}

/// Inserts `import` unless the name is already imported.
fn insert_unique(imports: &mut BTreeSet<NamedImport>, import: NamedImport) {
    if !imports.iter().any(|i| i.name == import.name) {
        imports.insert(import);
    }
}
