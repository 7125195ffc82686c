//! TypeScript source files backed by tree-sitter.
//!
//! A file is held as a list of top-level items. Classes are split into
//! decorators and members so they can be edited; everything else is kept as
//! source text. Named imports are lifted out and printed as one sorted block.

mod parse;
mod render;

use crate::decl::{ClassDecl, DecoratorDecl, NamedImport, PropertyDecl};
use crate::error::SyntaxError;
use crate::tree::{ClassView, PropertyView, SourceTree};
use parse::DocumentBuilder;
use render::{
    MEMBER_INDENT, comment_out, decorator_references, is_ident_part, property_references,
    render_decorator, render_imports, render_property, with_newline,
};
use std::collections::BTreeSet;
use tree_sitter::Parser;

/// Top-level item together with its separation from the previous one.
#[derive(Debug, Clone)]
struct Item {
    blank_before: bool,
    kind: ItemKind,
}

#[derive(Debug, Clone)]
enum ItemKind {
    /// Position of the named import block.
    Imports,
    Verbatim(Verbatim),
    Class(Class),
}

/// Source text the file does not edit.
#[derive(Debug, Clone)]
struct Verbatim {
    text: String,
    references: BTreeSet<String>,
    exported: BTreeSet<String>,
    comment_only: bool,
}

#[derive(Debug, Clone)]
struct Class {
    name: String,
    /// Comments directly above the class, including the line break after them.
    leading: Option<String>,
    /// Source text as parsed. Added properties are spliced into it; other
    /// edits clear it and the class is rendered from its parts.
    original: Option<String>,
    /// Offset of the closing brace of the body within `original`.
    body_close: Option<usize>,
    /// Indentation of the line holding the class.
    class_indent: String,
    /// Indentation of the members.
    indent: String,
    /// One nesting level, as used by the members.
    unit: String,
    prefix: String,
    /// Text from the `class` keyword up to the body.
    signature: String,
    signature_references: BTreeSet<String>,
    decorators: Vec<DecoratorSlot>,
    members: Vec<Member>,
}

#[derive(Debug, Clone)]
struct DecoratorSlot {
    name: String,
    text: String,
    references: BTreeSet<String>,
}

#[derive(Debug, Clone)]
enum Member {
    Property(Property),
    /// Methods, accessors, comments and anything else kept as text.
    Other {
        name: Option<String>,
        text: String,
        references: BTreeSet<String>,
    },
}

#[derive(Debug, Clone)]
struct Property {
    name: String,
    decorators: Vec<String>,
    text: String,
    references: BTreeSet<String>,
}

impl Class {
    fn from_decl(decl: &ClassDecl) -> Self {
        Self {
            name: decl.name.clone(),
            leading: None,
            original: None,
            body_close: None,
            class_indent: String::new(),
            indent: MEMBER_INDENT.to_string(),
            unit: MEMBER_INDENT.to_string(),
            prefix: if decl.exported {
                "export ".to_string()
            } else {
                String::new()
            },
            signature: format!("class {}", decl.name),
            signature_references: BTreeSet::new(),
            decorators: decl.decorators.iter().map(DecoratorSlot::from_decl).collect(),
            members: decl
                .properties
                .iter()
                .map(|p| Member::Property(Property::from_decl(p)))
                .collect(),
        }
    }

    fn print(&self, newline: &str) -> String {
        let body = match &self.original {
            Some(original) => original.clone(),
            None => with_newline(&self.render(), newline),
        };
        match &self.leading {
            Some(leading) => format!("{leading}{body}"),
            None => body,
        }
    }

    fn render(&self) -> String {
        let mut text = String::new();
        for decorator in &self.decorators {
            text.push_str(&decorator.text);
            text.push('\n');
        }
        text.push_str(&self.prefix);
        text.push_str(&self.signature);

        if self.members.is_empty() {
            text.push_str(" {}");
            return text;
        }

        let members: Vec<String> = self
            .members
            .iter()
            .map(|member| match member {
                Member::Property(property) => format!("{MEMBER_INDENT}{};", property.text),
                Member::Other { text, .. } => format!("{MEMBER_INDENT}{text}"),
            })
            .collect();
        text.push_str(" {\n");
        text.push_str(&members.join("\n\n"));
        text.push_str("\n}");
        text
    }

    /// Appends a property. A parsed class keeps its text: the property is
    /// inserted before the closing brace in the class's own indentation.
    fn append_property(&mut self, decl: &PropertyDecl, newline: &str) {
        let member = format!(
            "{}{};",
            self.indent,
            render_property(decl, &self.indent, &self.unit)
        );
        let member = with_newline(&member, newline);

        let spliced = match (&self.original, self.body_close) {
            (Some(original), Some(close)) => original.split_at_checked(close).map(|(head, tail)| {
                let body = head.trim_end();
                let separator = if body.ends_with('{') {
                    newline.to_string()
                } else {
                    newline.repeat(2)
                };
                let closing = &head[body.len()..];
                let closing = if closing.contains('\n') {
                    closing.to_string()
                } else {
                    format!("{newline}{}", self.class_indent)
                };
                let edited = format!("{body}{separator}{member}{closing}");
                (edited.len(), format!("{edited}{tail}"))
            }),
            _ => None,
        };
        match spliced {
            Some((close, text)) => {
                self.body_close = Some(close);
                self.original = Some(text);
            }
            None => self.original = None,
        }

        self.members.push(Member::Property(Property::from_decl(decl)));
    }

    fn references(&self) -> BTreeSet<String> {
        let mut references = self.signature_references.clone();
        for decorator in &self.decorators {
            references.extend(decorator.references.iter().cloned());
        }
        for member in &self.members {
            match member {
                Member::Property(property) => {
                    references.extend(property.references.iter().cloned());
                }
                Member::Other { references: r, .. } => references.extend(r.iter().cloned()),
            }
        }
        references
    }

    fn view(&self) -> ClassView {
        let mut references = self.references();
        references.remove(&self.name);
        ClassView {
            name: self.name.clone(),
            decorators: self.decorators.iter().map(|d| d.name.clone()).collect(),
            properties: self
                .members
                .iter()
                .filter_map(|member| match member {
                    Member::Property(property) => Some(PropertyView {
                        name: property.name.clone(),
                        decorators: property.decorators.clone(),
                        references: property.references.clone(),
                    }),
                    Member::Other { .. } => None,
                })
                .collect(),
            members: self
                .members
                .iter()
                .filter_map(|member| match member {
                    Member::Property(property) => Some(property.name.clone()),
                    Member::Other { name, .. } => name.clone(),
                })
                .collect(),
            references,
        }
    }
}

impl DecoratorSlot {
    fn from_decl(decl: &DecoratorDecl) -> Self {
        Self {
            name: decl.name.clone(),
            text: render_decorator(decl, "", MEMBER_INDENT),
            references: decorator_references(decl),
        }
    }
}

impl Property {
    fn from_decl(decl: &PropertyDecl) -> Self {
        Self {
            name: decl.name.clone(),
            decorators: decl.decorators.iter().map(|d| d.name.clone()).collect(),
            text: render_property(decl, MEMBER_INDENT, MEMBER_INDENT),
            references: property_references(decl),
        }
    }
}

/// A parsed TypeScript source file.
///
/// Printing an unedited file reproduces every statement as written; the
/// named import block is the only part that is always normalized. Generated
/// text uses the line ending the parsed file uses.
///
/// # Example
/// ```
/// use gqlsmith_syntax::{SourceTree, TsSourceFile};
///
/// let file = TsSourceFile::parse("export class User {}\n").unwrap();
/// assert!(file.find_class("User").is_some());
/// assert_eq!(file.print(), "export class User {}\n");
/// ```
#[derive(Debug, Clone)]
pub struct TsSourceFile {
    items: Vec<Item>,
    imports: Vec<NamedImport>,
    newline: &'static str,
}

impl TsSourceFile {
    /// Creates an empty source file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: vec![Item {
                blank_before: false,
                kind: ItemKind::Imports,
            }],
            imports: Vec::new(),
            newline: "\n",
        }
    }

    fn class(&self, name: &str) -> Option<&Class> {
        self.items.iter().find_map(|item| match &item.kind {
            ItemKind::Class(class) if class.name == name => Some(class),
            _ => None,
        })
    }

    fn class_mut(&mut self, name: &str) -> Option<&mut Class> {
        self.items.iter_mut().find_map(|item| match &mut item.kind {
            ItemKind::Class(class) if class.name == name => Some(class),
            _ => None,
        })
    }

    fn comment_texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match &item.kind {
            ItemKind::Verbatim(verbatim) if verbatim.comment_only => Some(verbatim.text.as_str()),
            ItemKind::Class(class) => class.leading.as_deref(),
            _ => None,
        })
    }
}

impl Default for TsSourceFile {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTree for TsSourceFile {
    fn parse(source: &str) -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|e| SyntaxError::Language {
                message: e.to_string(),
            })?;
        let tree = parser.parse(source, None).ok_or(SyntaxError::ParseFailed)?;
        let root = tree.root_node();
        if let Some(error) = parse::first_error(root) {
            return Err(error);
        }

        let mut builder = DocumentBuilder::new(source);
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            builder.push(node);
        }
        let (mut items, imports) = builder.finish();

        if !items.iter().any(|item| matches!(item.kind, ItemKind::Imports)) {
            if let Some(first) = items.first_mut() {
                first.blank_before = true;
            }
            items.insert(
                0,
                Item {
                    blank_before: false,
                    kind: ItemKind::Imports,
                },
            );
        }

        let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
        Ok(Self {
            items,
            imports,
            newline,
        })
    }

    fn print(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            let text = match &item.kind {
                ItemKind::Imports if self.imports.is_empty() => continue,
                ItemKind::Imports => with_newline(&render_imports(&self.imports), self.newline),
                ItemKind::Verbatim(verbatim) => verbatim.text.clone(),
                ItemKind::Class(class) => class.print(self.newline),
            };
            if !out.is_empty() {
                out.push_str(self.newline);
                if item.blank_before {
                    out.push_str(self.newline);
                }
            }
            out.push_str(&text);
        }
        if !out.is_empty() {
            out.push_str(self.newline);
        }
        out
    }

    fn find_class(&self, name: &str) -> Option<ClassView> {
        self.class(name).map(Class::view)
    }

    fn add_class(&mut self, class: &ClassDecl) {
        self.items.push(Item {
            blank_before: true,
            kind: ItemKind::Class(Class::from_decl(class)),
        });
    }

    fn add_property(&mut self, class: &str, property: &PropertyDecl) -> bool {
        let newline = self.newline;
        let Some(class) = self.class_mut(class) else {
            return false;
        };
        class.append_property(property, newline);
        true
    }

    fn remove_property(&mut self, class: &str, property: &str) -> bool {
        let Some(class) = self.class_mut(class) else {
            return false;
        };
        let before = class.members.len();
        class
            .members
            .retain(|m| !matches!(m, Member::Property(p) if p.name == property));
        let removed = class.members.len() != before;
        if removed {
            class.original = None;
        }
        removed
    }

    fn add_class_decorator(&mut self, class: &str, decorator: &DecoratorDecl) -> bool {
        let Some(class) = self.class_mut(class) else {
            return false;
        };
        class.original = None;
        class.decorators.push(DecoratorSlot::from_decl(decorator));
        true
    }

    fn remove_class_decorator(&mut self, class: &str, decorator: &str) -> bool {
        let Some(class) = self.class_mut(class) else {
            return false;
        };
        let before = class.decorators.len();
        class.decorators.retain(|d| d.name != decorator);
        let removed = class.decorators.len() != before;
        if removed {
            class.original = None;
        }
        removed
    }

    fn named_imports(&self) -> Vec<NamedImport> {
        self.imports.clone()
    }

    fn add_named_import(&mut self, import: NamedImport) -> bool {
        if self.imports.contains(&import) {
            return false;
        }
        self.imports.push(import);
        true
    }

    fn remove_named_import(&mut self, import: &NamedImport) -> bool {
        let before = self.imports.len();
        self.imports.retain(|i| i != import);
        self.imports.len() != before
    }

    fn exported_names(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .filter_map(|item| match &item.kind {
                ItemKind::Verbatim(verbatim) => Some(verbatim.exported.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn has_commented_class(&self, name: &str) -> bool {
        self.comment_texts().any(|text| {
            text.lines().any(|line| {
                let line = line.trim_start().trim_start_matches('/').trim_start();
                line.strip_prefix("export class ")
                    .and_then(|rest| rest.strip_prefix(name))
                    .is_some_and(|rest| !rest.starts_with(is_ident_part))
            })
        })
    }

    fn append_commented_class(&mut self, class: &ClassDecl) {
        let text = with_newline(&comment_out(&Class::from_decl(class).render()), self.newline);
        self.items.push(Item {
            blank_before: true,
            kind: ItemKind::Verbatim(Verbatim {
                text,
                references: BTreeSet::new(),
                exported: BTreeSet::new(),
                comment_only: true,
            }),
        });
    }

    fn references_outside(&self, class: &str) -> BTreeSet<String> {
        let mut references = BTreeSet::new();
        for item in &self.items {
            match &item.kind {
                ItemKind::Verbatim(verbatim) => {
                    references.extend(verbatim.references.iter().cloned());
                }
                ItemKind::Class(other) if other.name != class => {
                    references.extend(other.references());
                }
                _ => {}
            }
        }
        references
    }
}
