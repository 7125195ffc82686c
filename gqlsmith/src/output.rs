//! File system driver.
//!
//! Reads each target's prior file under the output base, runs the pipeline
//! and writes the result through a temporary file in the same directory
//! followed by a rename. Concurrent runs against the same output base are
//! not coordinated.

use gqlsmith_codegen::{CodegenError, Config, Generator, Target};
use gqlsmith_schema::Metadata;
use gqlsmith_syntax::TsSourceFile;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Outcome of writing one run to disk.
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Files whose content changed.
    pub written: Vec<PathBuf>,
    /// Files already holding the generated content.
    pub unchanged: Vec<PathBuf>,
    /// Targets whose generation failed; their files were not touched.
    pub failures: Vec<(Target, CodegenError)>,
}

impl WriteSummary {
    /// Returns true if every target was generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generates every target of `metadata` into the configured output base.
///
/// # Arguments
/// * `metadata` - Loaded metadata document
/// * `config` - Generation options; `output` is the base directory
///
/// # Returns
/// The written, unchanged and failed targets.
///
/// # Errors
/// Returns `CodegenError::Io` if a prior file cannot be read or a result
/// cannot be written. Generation failures are collected in the summary.
pub fn generate_into(metadata: &Metadata, config: &Config) -> Result<WriteSummary, CodegenError> {
    let generator = Generator::new(metadata, config);
    let base = config.output();
    let mut summary = WriteSummary::default();

    for target in generator.targets() {
        let path = base.join(generator.path(&target));
        let existing = read_existing(&path)?;

        let file = match generator.generate::<TsSourceFile>(&target, existing.as_deref()) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                summary.failures.push((target, e));
                continue;
            }
        };

        if existing.as_deref() == Some(file.content.as_str()) {
            summary.unchanged.push(path);
            continue;
        }

        write_atomic(&path, &file.content)?;
        tracing::info!("wrote {}", path.display());
        summary.written.push(path);
    }

    Ok(summary)
}

/// Loads, validates and generates a metadata document file.
///
/// # Errors
/// Returns `CodegenError` if the metadata cannot be loaded or is
/// inconsistent, or on I/O failure.
pub fn generate_into_from_file(
    metadata_path: &Path,
    config: &Config,
) -> Result<WriteSummary, CodegenError> {
    let metadata = gqlsmith_schema::parse_metadata_file(metadata_path)?;
    gqlsmith_schema::validate_metadata(&metadata)?;
    generate_into(&metadata, config)
}

fn read_existing(path: &Path) -> Result<Option<String>, CodegenError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), CodegenError> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| CodegenError::Io(e.error))?;
    Ok(())
}
