//! TypeScript spelling of declarations.

use crate::decl::{DecoratorArg, DecoratorDecl, NamedImport, PropertyDecl};
use std::collections::{BTreeMap, BTreeSet};

/// Indentation of class members.
pub(crate) const MEMBER_INDENT: &str = "    ";

/// Words that look like identifiers but never name an importable symbol.
const KEYWORDS: &[&str] = &[
    "true", "false", "null", "undefined", "typeof", "keyof", "new", "void", "this",
];

/// Renders a decorator whose `@` sits at column `indent.len()`.
///
/// Object arguments are spread over one line per entry with trailing commas,
/// nested one `unit` deeper than the decorator.
pub(crate) fn render_decorator(decorator: &DecoratorDecl, indent: &str, unit: &str) -> String {
    let arguments: Vec<String> = decorator
        .arguments
        .iter()
        .map(|arg| match arg {
            DecoratorArg::Expr(expr) => expr.clone(),
            DecoratorArg::Object(entries) => {
                let mut object = String::from("{\n");
                for (key, value) in entries {
                    object.push_str(&format!("{indent}{unit}{key}: {value},\n"));
                }
                object.push_str(indent);
                object.push('}');
                object
            }
        })
        .collect();

    format!("@{}({})", decorator.name, arguments.join(", "))
}

/// Renders a property member placed at `indent`, without its leading indent
/// and semicolon.
pub(crate) fn render_property(property: &PropertyDecl, indent: &str, unit: &str) -> String {
    let mut text = String::new();
    for decorator in &property.decorators {
        text.push_str(&render_decorator(decorator, indent, unit));
        text.push('\n');
        text.push_str(indent);
    }
    let token = if property.required { '!' } else { '?' };
    text.push_str(&format!("{}{}: {}", property.name, token, property.type_text));
    text
}

/// Renders the named import block.
///
/// Package modules come first and relative modules follow after a blank
/// line; modules and names are sorted.
pub(crate) fn render_imports(imports: &[NamedImport]) -> String {
    let (relative, packages): (Vec<&NamedImport>, Vec<&NamedImport>) =
        imports.iter().partition(|import| import.is_relative());

    [packages, relative]
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| import_group(group))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders one import statement per module, sorted.
fn import_group(imports: &[&NamedImport]) -> String {
    let mut by_module: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for import in imports {
        by_module
            .entry(import.module.as_str())
            .or_default()
            .insert(import.name.as_str());
    }
    by_module
        .iter()
        .map(|(module, names)| import_line(module, names))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders one import statement.
fn import_line(module: &str, names: &BTreeSet<&str>) -> String {
    let names: Vec<&str> = names.iter().copied().collect();
    format!("import {{ {} }} from '{}';", names.join(", "), module)
}

/// Spells every line break of generated `text` as `newline`.
pub(crate) fn with_newline(text: &str, newline: &str) -> String {
    if newline == "\n" {
        text.to_string()
    } else {
        text.replace("\r\n", "\n").replace('\n', newline)
    }
}

/// Returns the whitespace between the start of the line holding `offset` and
/// `offset`, or `None` if other text precedes it on that line.
pub(crate) fn line_indent(source: &str, offset: usize) -> Option<&str> {
    let before = source.get(..offset)?;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let indent = &before[line_start..];
    indent.chars().all(|c| c == ' ' || c == '\t').then_some(indent)
}

/// Turns every line of `text` into a line comment.
pub(crate) fn comment_out(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "//".to_string()
            } else {
                format!("// {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collects identifiers in an expression, skipping string literals and numbers.
pub(crate) fn scan_identifiers(expr: &str, out: &mut BTreeSet<String>) {
    let chars: Vec<char> = expr.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' || c == '\'' || c == '`' {
            i += 1;
            while i < chars.len() && chars[i] != c {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            i += 1;
        } else if c.is_ascii_digit() {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '.' || chars[i] == '_')
            {
                i += 1;
            }
        } else if is_ident_start(c) {
            let start = i;
            while i < chars.len() && is_ident_part(chars[i]) {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();
            if !KEYWORDS.contains(&ident.as_str()) {
                out.insert(ident);
            }
        } else {
            i += 1;
        }
    }
}

/// Identifiers referenced by a decorator call.
pub(crate) fn decorator_references(decorator: &DecoratorDecl) -> BTreeSet<String> {
    let mut references = BTreeSet::new();
    references.insert(decorator.name.clone());
    for arg in &decorator.arguments {
        match arg {
            DecoratorArg::Expr(expr) => scan_identifiers(expr, &mut references),
            DecoratorArg::Object(entries) => {
                for (_, value) in entries {
                    scan_identifiers(value, &mut references);
                }
            }
        }
    }
    references
}

/// Identifiers referenced by a property declaration.
pub(crate) fn property_references(property: &PropertyDecl) -> BTreeSet<String> {
    let mut references = BTreeSet::new();
    for decorator in &property.decorators {
        references.extend(decorator_references(decorator));
    }
    scan_identifiers(&property.type_text, &mut references);
    references
}

/// Returns true if `c` may start an identifier.
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Returns true if `c` may continue an identifier.
pub(crate) fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
