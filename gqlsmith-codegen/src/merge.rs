//! Non-destructive merge of a synthesized class into an existing file.
//!
//! The merge never removes or rewrites a property that already exists. The
//! import block is the only previously written content it recomputes.

use crate::class::{ClassDescriptor, FieldDescriptor};
use crate::config::Config;
use crate::error::CodegenError;
use crate::imports::ImportPlanner;
use gqlsmith_schema::Metadata;
use gqlsmith_syntax::{ClassView, NamedImport, SourceTree};
use std::collections::BTreeSet;

/// State of the target file with respect to the synthesized class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeState {
    /// No declaration of the class exists.
    Absent,
    /// The file re-exports a symbol of the same name.
    Reexported,
    /// A class of that name exists without the expected class decorator.
    HandAuthoredOptOut,
    /// A decorated class of that name exists.
    GeneratedOrPartial,
}

/// What an existing file holds, captured before any mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingFileState {
    /// Whether a class of that name is declared.
    pub has_class: bool,
    /// Whether that class lacks the expected class decorator.
    pub class_is_hand_authored: bool,
    /// Whether the name is re-exported from another module.
    pub is_reexported: bool,
    /// Whether a commented-out copy of the class is present.
    pub has_commented_class: bool,
    /// Property names of the existing class, in order.
    pub existing_field_names: Vec<String>,
    /// Named imports of the file.
    pub existing_imports: Vec<NamedImport>,
    /// View of the existing class.
    pub class_view: Option<ClassView>,
}

impl ExistingFileState {
    /// Inspects a parsed file.
    ///
    /// # Arguments
    /// * `tree` - Parsed file
    /// * `class_name` - Name of the synthesized class
    /// * `class_decorator` - Decorator a generated class carries
    #[must_use]
    pub fn inspect<T: SourceTree>(tree: &T, class_name: &str, class_decorator: &str) -> Self {
        let class_view = tree.find_class(class_name);
        Self {
            has_class: class_view.is_some(),
            class_is_hand_authored: class_view
                .as_ref()
                .is_some_and(|view| !view.has_decorator(class_decorator)),
            is_reexported: tree.exported_names().contains(class_name),
            has_commented_class: tree.has_commented_class(class_name),
            existing_field_names: class_view
                .as_ref()
                .map(ClassView::property_names)
                .unwrap_or_default(),
            existing_imports: tree.named_imports(),
            class_view,
        }
    }

    /// Returns the merge state.
    #[must_use]
    pub fn state(&self) -> MergeState {
        if self.is_reexported {
            MergeState::Reexported
        } else if !self.has_class {
            MergeState::Absent
        } else if self.class_is_hand_authored {
            MergeState::HandAuthoredOptOut
        } else {
            MergeState::GeneratedOrPartial
        }
    }
}

/// Outcome of one merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Class name.
    pub class: String,
    /// State the file was in.
    pub state: MergeState,
    /// Fields appended to an existing class, or every field of a new class.
    pub appended_fields: Vec<String>,
    /// Existing properties without the field decorator, and methods or
    /// accessors named like a field.
    pub opted_out_fields: Vec<String>,
    /// Imports added.
    pub added_imports: Vec<NamedImport>,
    /// Stale imports removed.
    pub removed_imports: Vec<NamedImport>,
}

impl MergeReport {
    fn new(class: &str, state: MergeState) -> Self {
        Self {
            class: class.to_string(),
            state,
            appended_fields: Vec::new(),
            opted_out_fields: Vec::new(),
            added_imports: Vec::new(),
            removed_imports: Vec::new(),
        }
    }

    /// Returns true if the merge changed nothing.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.appended_fields.is_empty()
            && self.added_imports.is_empty()
            && self.removed_imports.is_empty()
            && self.state != MergeState::Absent
    }
}

/// Reconciles synthesized classes with existing files.
#[derive(Debug, Clone, Copy)]
pub struct MergeEngine<'a> {
    config: &'a Config,
    planner: ImportPlanner<'a>,
}

impl<'a> MergeEngine<'a> {
    /// Creates a merge engine.
    #[must_use]
    pub fn new(metadata: &'a Metadata, config: &'a Config) -> Self {
        Self {
            config,
            planner: ImportPlanner::new(metadata, config),
        }
    }

    /// Merges a class into an existing or empty source text.
    ///
    /// # Arguments
    /// * `existing` - Prior file content, if the file exists
    /// * `class` - Synthesized class
    ///
    /// # Returns
    /// The final file content and the merge report.
    ///
    /// # Errors
    /// Returns `CodegenError::Syntax` if the existing content cannot be parsed.
    pub fn merge_source<T: SourceTree>(
        &self,
        existing: Option<&str>,
        class: &ClassDescriptor,
    ) -> Result<(String, MergeReport), CodegenError> {
        let mut tree = T::parse(existing.unwrap_or_default())?;
        let report = self.merge(&mut tree, class);
        Ok((tree.print(), report))
    }

    /// Merges a class into a parsed file.
    pub fn merge<T: SourceTree>(&self, tree: &mut T, class: &ClassDescriptor) -> MergeReport {
        let names = self.config.decorators();
        let decorator = class.mode.class_decorator(names);
        let existing = ExistingFileState::inspect(tree, &class.name, decorator);
        let state = existing.state();
        let mut report = MergeReport::new(&class.name, state);
        tracing::debug!("merging {} as {:?}", class.name, state);

        let outside = tree.references_outside(&class.name);
        let preserved = ImportPlanner::preserved(&existing.existing_imports, &outside);

        let planned = match (state, &existing.class_view) {
            (MergeState::Reexported, _) => {
                if !existing.has_commented_class {
                    tree.append_commented_class(&class.class_decl(names));
                }
                BTreeSet::new()
            }
            (MergeState::HandAuthoredOptOut, Some(view)) => {
                self.planner
                    .plan_retained(class, view, &[], &existing.existing_imports)
            }
            (MergeState::GeneratedOrPartial, Some(view)) => {
                report.opted_out_fields = view
                    .members
                    .iter()
                    .filter(|name| match view.property(name) {
                        Some(property) => !property.has_decorator(&names.field),
                        None => class.fields.iter().any(|field| &field.name == *name),
                    })
                    .cloned()
                    .collect();

                let appended: Vec<&FieldDescriptor> = class
                    .fields
                    .iter()
                    .filter(|field| !view.has_member(&field.name))
                    .collect();
                for field in &appended {
                    tree.add_property(&class.name, &field.property(&names.field));
                    report.appended_fields.push(field.name.clone());
                }
                if !appended.is_empty() {
                    tracing::debug!(
                        "appended {} fields to {}: {}",
                        appended.len(),
                        class.name,
                        report.appended_fields.join(", ")
                    );
                }

                self.planner
                    .plan_retained(class, view, &appended, &existing.existing_imports)
            }
            _ => {
                tree.add_class(&class.class_decl(names));
                report.appended_fields = class.fields.iter().map(|f| f.name.clone()).collect();
                self.planner.plan(class)
            }
        };

        let required = ImportPlanner::combine(preserved, planned);
        for stale in ImportPlanner::stale_imports(&existing.existing_imports, &required) {
            tracing::debug!("removing stale import {} from '{}'", stale.name, stale.module);
            tree.remove_named_import(&stale);
            report.removed_imports.push(stale);
        }
        for import in required {
            if !existing.existing_imports.contains(&import) {
                tracing::debug!("adding import {} from '{}'", import.name, import.module);
                tree.add_named_import(import.clone());
                report.added_imports.push(import);
            }
        }

        report
    }
}
