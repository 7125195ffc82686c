//! Per-file generation driver.

use crate::class::ClassSynthesizer;
use crate::config::Config;
use crate::enums::EnumGenerator;
use crate::error::CodegenError;
use crate::layout::{FileKind, ModuleLayout};
use crate::merge::{MergeEngine, MergeReport};
use gqlsmith_schema::Metadata;
use gqlsmith_syntax::SourceTree;
use std::fmt;

/// Kind of definition a target file is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// A model.
    Model,
    /// An input shape.
    InputShape,
    /// An output shape.
    OutputShape,
    /// An enum.
    Enum,
}

impl TargetKind {
    /// Returns the file kind written for this target kind.
    #[must_use]
    pub const fn file_kind(&self) -> FileKind {
        match self {
            Self::Model => FileKind::Model,
            Self::InputShape => FileKind::Input,
            Self::OutputShape => FileKind::Output,
            Self::Enum => FileKind::Enum,
        }
    }
}

/// One generated file's source definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Definition name.
    pub name: String,
    /// Definition kind.
    pub kind: TargetKind,
}

impl Target {
    /// Creates a target.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind.file_kind())
    }
}

/// Final content of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output base.
    pub path: String,
    /// File content.
    pub content: String,
    /// Merge outcome; `None` for enum files.
    pub report: Option<MergeReport>,
}

/// Files produced by one run, with the targets that failed.
#[derive(Debug, Default)]
pub struct GenerationOutput {
    /// Generated files, in target order.
    pub files: Vec<GeneratedFile>,
    /// Targets whose generation failed.
    pub failures: Vec<(Target, CodegenError)>,
}

impl GenerationOutput {
    /// Returns the generated file at `path`.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }

    /// Returns true if every target was generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main generator running every stage for one metadata document.
pub struct Generator<'a> {
    metadata: &'a Metadata,
    config: &'a Config,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(metadata: &'a Metadata, config: &'a Config) -> Self {
        Self { metadata, config }
    }

    /// Enumerates targets: models, input shapes, output shapes, then enums.
    #[must_use]
    pub fn targets(&self) -> Vec<Target> {
        let metadata = self.metadata;
        metadata
            .models
            .iter()
            .map(|m| Target::new(&m.name, TargetKind::Model))
            .chain(
                metadata
                    .input_shapes
                    .iter()
                    .map(|s| Target::new(&s.name, TargetKind::InputShape)),
            )
            .chain(
                metadata
                    .output_shapes
                    .iter()
                    .map(|s| Target::new(&s.name, TargetKind::OutputShape)),
            )
            .chain(
                metadata
                    .enums
                    .iter()
                    .map(|e| Target::new(&e.name, TargetKind::Enum)),
            )
            .collect()
    }

    /// Returns the file path of a target, relative to the output base.
    #[must_use]
    pub fn path(&self, target: &Target) -> String {
        let layout = ModuleLayout::new(self.metadata, self.config);
        layout.path(&layout.class_ref(&target.name, target.kind.file_kind()))
    }

    /// Generates one file.
    ///
    /// # Arguments
    /// * `target` - Definition to generate
    /// * `existing` - Prior content of the target file, if any
    ///
    /// # Errors
    /// Returns `CodegenError` if the target is unknown, a field cannot be
    /// resolved or the existing content cannot be parsed.
    pub fn generate<T: SourceTree>(
        &self,
        target: &Target,
        existing: Option<&str>,
    ) -> Result<GeneratedFile, CodegenError> {
        let path = self.path(target);
        let synthesizer = ClassSynthesizer::new(self.metadata, self.config);
        let missing = || CodegenError::generation(format!("unknown target {target}"));

        let class = match target.kind {
            TargetKind::Enum => {
                let enum_def = self.metadata.enum_def(&target.name).ok_or_else(missing)?;
                tracing::debug!(
                    "rendering enum {} ({} values)",
                    enum_def.name,
                    enum_def.values.len()
                );
                return Ok(GeneratedFile {
                    path,
                    content: EnumGenerator::new(self.config).generate(enum_def),
                    report: None,
                });
            }
            TargetKind::Model => {
                let model = self.metadata.model(&target.name).ok_or_else(missing)?;
                synthesizer.synthesize_model(model)?
            }
            TargetKind::InputShape => {
                let shape = self.metadata.input_shape(&target.name).ok_or_else(missing)?;
                synthesizer.synthesize_input(shape)?
            }
            TargetKind::OutputShape => {
                let shape = self.metadata.output_shape(&target.name).ok_or_else(missing)?;
                synthesizer.synthesize_output(shape)?
            }
        };

        let (content, report) =
            MergeEngine::new(self.metadata, self.config).merge_source::<T>(existing, &class)?;
        Ok(GeneratedFile {
            path,
            content,
            report: Some(report),
        })
    }

    /// Generates every target.
    ///
    /// A failing target is recorded and skipped; the others still run.
    ///
    /// # Arguments
    /// * `existing` - Returns the prior content of a path, if any
    pub fn generate_all<T, F>(&self, mut existing: F) -> GenerationOutput
    where
        T: SourceTree,
        F: FnMut(&str) -> Option<String>,
    {
        let mut output = GenerationOutput::default();
        for target in self.targets() {
            let prior = existing(&self.path(&target));
            match self.generate::<T>(&target, prior.as_deref()) {
                Ok(file) => output.files.push(file),
                Err(e) => {
                    tracing::warn!("failed to generate {}: {}", target, e);
                    output.failures.push((target, e));
                }
            }
        }
        tracing::info!(
            "generated {} files, {} failed",
            output.files.len(),
            output.failures.len()
        );
        output
    }
}
