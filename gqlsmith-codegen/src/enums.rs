//! Enum file generation.
//!
//! Enum files are fully generated and overwritten on every run.

use crate::class::quote;
use crate::config::Config;
use gqlsmith_schema::EnumDef;

/// Generator for enum files.
pub struct EnumGenerator<'a> {
    config: &'a Config,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Generates the file content of one enum.
    ///
    /// # Arguments
    /// * `enum_def` - Enum definition
    ///
    /// # Returns
    /// The enum declaration followed by its registration call.
    #[must_use]
    pub fn generate(&self, enum_def: &EnumDef) -> String {
        let names = self.config.decorators();
        let mut output = String::new();

        output.push_str(&format!(
            "import {{ {} }} from '{}';\n\n",
            names.enum_registration, names.module
        ));

        output.push_str(&format!("export enum {} {{\n", enum_def.name));
        for value in &enum_def.values {
            output.push_str(&format!("    {value} = '{value}',\n"));
        }
        output.push_str("}\n\n");

        output.push_str(&format!(
            "{}({}, {{\n",
            names.enum_registration, enum_def.name
        ));
        output.push_str(&format!("    name: '{}',\n", enum_def.name));
        if let Some(doc) = enum_def
            .documentation
            .as_deref()
            .map(str::trim)
            .filter(|doc| !doc.is_empty())
        {
            output.push_str(&format!("    description: {},\n", quote(doc)));
        }
        output.push_str("});\n");

        output
    }
}
