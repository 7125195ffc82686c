//! Builds the source model from a tree-sitter syntax tree.

use super::render::{MEMBER_INDENT, line_indent};
use super::{Class, DecoratorSlot, Item, ItemKind, Member, Property, Verbatim};
use crate::decl::NamedImport;
use crate::error::SyntaxError;
use std::collections::BTreeSet;
use tree_sitter::Node;

/// Accumulates top-level items while walking the program node.
pub(super) struct DocumentBuilder<'s> {
    source: &'s str,
    items: Vec<Item>,
    imports: Vec<NamedImport>,
    last_end: Option<usize>,
    /// Start offset of the trailing verbatim item, while it can still grow.
    open_verbatim: Option<usize>,
}

impl<'s> DocumentBuilder<'s> {
    pub(super) fn new(source: &'s str) -> Self {
        Self {
            source,
            items: Vec::new(),
            imports: Vec::new(),
            last_end: None,
            open_verbatim: None,
        }
    }

    pub(super) fn finish(self) -> (Vec<Item>, Vec<NamedImport>) {
        (self.items, self.imports)
    }

    /// Adds one top-level statement or comment.
    pub(super) fn push(&mut self, node: Node<'_>) {
        let blank_before = self.blank_line_before(node);
        let adjacent = !blank_before && self.last_end.is_some();
        self.last_end = Some(node.end_byte());

        if node.kind() == "import_statement"
            && let Some(imports) = named_imports(node, self.source)
        {
            self.open_verbatim = None;
            if !self.items.iter().any(|item| matches!(item.kind, ItemKind::Imports)) {
                self.items.push(Item {
                    blank_before,
                    kind: ItemKind::Imports,
                });
            }
            for import in imports {
                if !self.imports.contains(&import) {
                    self.imports.push(import);
                }
            }
            return;
        }

        if let Some(mut class) = parse_class(node, self.source) {
            let mut blank_before = blank_before;
            if adjacent
                && let Some(start) = self.open_verbatim
                && let Some(Item {
                    blank_before: comment_blank,
                    kind: ItemKind::Verbatim(verbatim),
                }) = self.items.last()
                && verbatim.comment_only
            {
                class.leading = Some(slice(self.source, start, node.start_byte()).to_string());
                blank_before = *comment_blank;
                self.items.pop();
            }
            self.open_verbatim = None;
            self.items.push(Item {
                blank_before,
                kind: ItemKind::Class(class),
            });
            return;
        }

        let is_comment = node.kind() == "comment";
        let mut exported = BTreeSet::new();
        if node.kind() == "export_statement" && node.child_by_field_name("source").is_some() {
            exported = export_clause_names(node, self.source);
        }
        let mut references = BTreeSet::new();
        collect_identifiers(node, self.source, &mut references);

        if adjacent
            && let Some(start) = self.open_verbatim
            && let Some(Item {
                kind: ItemKind::Verbatim(verbatim),
                ..
            }) = self.items.last_mut()
        {
            verbatim.text = slice(self.source, start, node.end_byte()).to_string();
            verbatim.references.extend(references);
            verbatim.exported.extend(exported);
            verbatim.comment_only &= is_comment;
            return;
        }

        self.open_verbatim = Some(node.start_byte());
        self.items.push(Item {
            blank_before,
            kind: ItemKind::Verbatim(Verbatim {
                text: node_text(node, self.source).to_string(),
                references,
                exported,
                comment_only: is_comment,
            }),
        });
    }

    /// Returns true if an empty line separates `node` from the previous one.
    fn blank_line_before(&self, node: Node<'_>) -> bool {
        match self.last_end {
            Some(end) => slice(self.source, end, node.start_byte()).matches('\n').count() >= 2,
            None => false,
        }
    }
}

/// Returns the first syntax error in the tree, if any.
pub(super) fn first_error(root: Node<'_>) -> Option<SyntaxError> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let position = node.start_position();
            return Some(SyntaxError::Malformed {
                line: position.row + 1,
                column: position.column + 1,
                kind: if node.is_missing() {
                    format!("missing {}", node.kind())
                } else {
                    "token".to_string()
                },
            });
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    Some(SyntaxError::Malformed {
        line: 1,
        column: 1,
        kind: "token".to_string(),
    })
}

/// Parses `import { a, b } from 'm'`. Other import forms return `None`.
fn named_imports(node: Node<'_>, source: &str) -> Option<Vec<NamedImport>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    if children.iter().any(|c| c.kind() == "type" || c.kind() == "typeof") {
        return None;
    }
    let clause = children.iter().find(|c| c.kind() == "import_clause")?;
    let module = string_value(node.child_by_field_name("source")?, source);

    let mut clause_cursor = clause.walk();
    let parts: Vec<Node<'_>> = clause.named_children(&mut clause_cursor).collect();
    let [named] = parts.as_slice() else {
        return None;
    };
    if named.kind() != "named_imports" {
        return None;
    }

    let mut imports = Vec::new();
    let mut named_cursor = named.walk();
    for specifier in named.named_children(&mut named_cursor) {
        if specifier.kind() != "import_specifier" {
            continue;
        }
        if specifier.child_by_field_name("alias").is_some() {
            return None;
        }
        let mut spec_cursor = specifier.walk();
        if specifier.children(&mut spec_cursor).any(|c| c.kind() == "type") {
            return None;
        }
        let name = specifier.child_by_field_name("name")?;
        imports.push(NamedImport::new(node_text(name, source), module.clone()));
    }
    Some(imports)
}

/// Names re-exported by an `export { .. } from '..'` statement.
fn export_clause_names(node: Node<'_>, source: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "export_clause" {
            continue;
        }
        let mut clause_cursor = child.walk();
        for specifier in child.named_children(&mut clause_cursor) {
            if specifier.kind() != "export_specifier" {
                continue;
            }
            let exported = specifier
                .child_by_field_name("alias")
                .or_else(|| specifier.child_by_field_name("name"));
            if let Some(exported) = exported {
                names.insert(string_value(exported, source));
            }
        }
    }
    names
}

/// Parses a class declaration, exported or not.
fn parse_class(outer: Node<'_>, source: &str) -> Option<Class> {
    let class_node = match outer.kind() {
        "export_statement" => outer.child_by_field_name("declaration")?,
        "class_declaration" => outer,
        _ => return None,
    };
    if class_node.kind() != "class_declaration" {
        return None;
    }

    let name_node = class_node.child_by_field_name("name")?;
    let body = class_node.child_by_field_name("body")?;

    let mut decorators = Vec::new();
    let mut cursor = outer.walk();
    if outer.kind() == "export_statement" {
        for decorator in outer.children_by_field_name("decorator", &mut cursor) {
            decorators.push(decorator_slot(decorator, source));
        }
    }
    let mut class_cursor = class_node.walk();
    for decorator in class_node.children_by_field_name("decorator", &mut class_cursor) {
        decorators.push(decorator_slot(decorator, source));
    }

    let mut keyword_cursor = class_node.walk();
    let keyword_start = class_node
        .children(&mut keyword_cursor)
        .find(|c| c.kind() == "class")
        .map_or(name_node.start_byte(), |c| c.start_byte());
    let signature = slice(source, keyword_start, body.start_byte())
        .trim_end()
        .to_string();

    let mut prefix = String::new();
    if outer.kind() == "export_statement" {
        prefix.push_str("export ");
        let mut default_cursor = outer.walk();
        if outer.children(&mut default_cursor).any(|c| c.kind() == "default") {
            prefix.push_str("default ");
        }
    }

    let mut signature_references = BTreeSet::new();
    let mut heritage_cursor = class_node.walk();
    for child in class_node.named_children(&mut heritage_cursor) {
        if child.id() == name_node.id() || child.id() == body.id() || child.kind() == "decorator"
        {
            continue;
        }
        collect_identifiers(child, source, &mut signature_references);
    }

    let original = node_text(outer, source).to_string();
    let body_close = body
        .end_byte()
        .checked_sub(outer.start_byte() + 1)
        .filter(|&close| original.as_bytes().get(close) == Some(&b'}'));
    let class_indent = line_indent(source, outer.start_byte())
        .unwrap_or_default()
        .to_string();
    let indent =
        member_indent(body, source).unwrap_or_else(|| format!("{class_indent}{MEMBER_INDENT}"));
    let unit = indent
        .strip_prefix(class_indent.as_str())
        .filter(|unit| !unit.is_empty())
        .unwrap_or(MEMBER_INDENT)
        .to_string();

    Some(Class {
        name: node_text(name_node, source).to_string(),
        leading: None,
        original: Some(original),
        body_close,
        class_indent,
        indent,
        unit,
        prefix,
        signature,
        signature_references,
        decorators,
        members: parse_members(body, source),
    })
}

/// Indentation of the first member, when it starts its own line.
fn member_indent(body: Node<'_>, source: &str) -> Option<String> {
    let mut cursor = body.walk();
    let first = body.named_children(&mut cursor).next()?;
    line_indent(source, first.start_byte())
        .filter(|indent| !indent.is_empty())
        .map(str::to_string)
}

/// Splits a class body into members.
///
/// Decorators and comments directly above a member belong to it. A comment
/// followed by an empty line, or trailing a member on its line, stands alone.
fn parse_members(body: Node<'_>, source: &str) -> Vec<Member> {
    let mut members = Vec::new();
    let mut pending: Vec<Node<'_>> = Vec::new();
    let mut last_row = None;
    let mut cursor = body.walk();

    for child in body.children(&mut cursor) {
        match child.kind() {
            "{" | "}" | ";" | "," => continue,
            _ if !child.is_named() => continue,
            _ => {}
        }

        if pending.last().is_some_and(|last| separated(source, *last, child))
            && pending.iter().all(|node| node.kind() == "comment")
        {
            members.push(detached(&pending, source));
            pending.clear();
        }
        match child.kind() {
            "comment" if pending.is_empty() && last_row == Some(child.start_position().row) => {
                members.push(detached(&[child], source));
                continue;
            }
            "decorator" | "comment" => {
                pending.push(child);
                continue;
            }
            _ => {}
        }
        last_row = Some(child.end_position().row);

        let start = pending.first().map_or(child.start_byte(), |d| d.start_byte());
        let text = slice(source, start, child.end_byte()).to_string();
        let mut references = BTreeSet::new();
        let mut decorators: Vec<String> = Vec::new();
        for decorator in pending.iter().filter(|node| node.kind() == "decorator") {
            collect_identifiers(*decorator, source, &mut references);
            decorators.push(decorator_name(*decorator, source));
        }
        collect_identifiers(child, source, &mut references);
        pending.clear();

        if child.kind() == "public_field_definition"
            && let Some(name) = child.child_by_field_name("name")
        {
            let mut field_cursor = child.walk();
            for decorator in child.children_by_field_name("decorator", &mut field_cursor) {
                decorators.push(decorator_name(decorator, source));
            }
            members.push(Member::Property(Property {
                name: string_value(name, source),
                decorators,
                text,
                references,
            }));
        } else {
            let name = matches!(
                child.kind(),
                "method_definition" | "method_signature" | "abstract_method_signature"
            )
            .then(|| child.child_by_field_name("name"))
            .flatten()
            .map(|name| string_value(name, source));
            members.push(Member::Other {
                name,
                text,
                references,
            });
        }
    }

    if !pending.is_empty() {
        members.push(detached(&pending, source));
    }
    members
}

/// Returns true if an empty line lies between `first` and `second`.
fn separated(source: &str, first: Node<'_>, second: Node<'_>) -> bool {
    slice(source, first.end_byte(), second.start_byte())
        .matches('\n')
        .count()
        >= 2
}

/// Keeps a run of body nodes that belong to no member as one unnamed member.
fn detached(nodes: &[Node<'_>], source: &str) -> Member {
    let mut references = BTreeSet::new();
    for node in nodes {
        collect_identifiers(*node, source, &mut references);
    }
    let start = nodes.first().map_or(0, Node::start_byte);
    let end = nodes.last().map_or(0, Node::end_byte);
    Member::Other {
        name: None,
        text: slice(source, start, end).to_string(),
        references,
    }
}

/// Captures a class-level decorator.
fn decorator_slot(node: Node<'_>, source: &str) -> DecoratorSlot {
    let mut references = BTreeSet::new();
    collect_identifiers(node, source, &mut references);
    DecoratorSlot {
        name: decorator_name(node, source),
        text: node_text(node, source).to_string(),
        references,
    }
}

/// Returns the called name of a decorator (`@a.Field()` yields `Field`).
fn decorator_name(node: Node<'_>, source: &str) -> String {
    let mut cursor = node.walk();
    let Some(expr) = node.named_children(&mut cursor).next() else {
        return String::new();
    };
    let callee = if expr.kind() == "call_expression" {
        expr.child_by_field_name("function").unwrap_or(expr)
    } else {
        expr
    };
    let text = node_text(callee, source);
    text.rsplit('.').next().unwrap_or(text).trim().to_string()
}

/// Collects referenced identifiers below `node`.
fn collect_identifiers(node: Node<'_>, source: &str, out: &mut BTreeSet<String>) {
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        match current.kind() {
            "identifier" | "type_identifier" | "shorthand_property_identifier" => {
                out.insert(node_text(current, source).to_string());
            }
            "comment" => continue,
            _ => {}
        }
        let mut cursor = current.walk();
        stack.extend(current.named_children(&mut cursor));
    }
}

/// Returns the unquoted value of a string or identifier node.
fn string_value(node: Node<'_>, source: &str) -> String {
    node_text(node, source)
        .trim_matches(|c| c == '\'' || c == '"' || c == '`')
        .to_string()
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    slice(source, node.start_byte(), node.end_byte())
}

fn slice(source: &str, start: usize, end: usize) -> &str {
    source.get(start..end).unwrap_or_default()
}
