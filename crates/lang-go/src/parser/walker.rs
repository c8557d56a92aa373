use super::position_of;
use crate::directive::{self, MAX_COMMENT_LINE};
use crate::tags::BuildTags;
use gbuild_core::model::{Directive, DirectiveKind, Position};
use serde::Serialize;
use tree_sitter::{Node, Tree};

/// Syntax facts of one file, before any `pkg-config` lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScannedSource {
    pub package: String,
    pub deps: Vec<String>,
    pub funcs: Vec<String>,
    /// Directives in source order.
    pub directives: Vec<Directive>,
}

/// Node kinds whose children are visited. Every other kind ends its branch.
const GROUP_KINDS: &[&str] = &[
    "import_declaration",
    "import_spec_list",
    "const_declaration",
    "var_declaration",
    "type_declaration",
];

pub(crate) struct Walker<'a> {
    source: &'a str,
    tags: &'a BuildTags,
    scan_funcs: bool,
    pkg_pos: usize,
    result: ScannedSource,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(source: &'a str, tags: &'a BuildTags, scan_funcs: bool) -> Self {
        Self {
            source,
            tags,
            scan_funcs,
            pkg_pos: 0,
            result: ScannedSource::default(),
        }
    }

    pub(crate) fn walk(mut self, tree: &Tree) -> ScannedSource {
        self.visit(tree.root_node());
        self.result
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            "source_file" => {
                self.record_package(node);
                self.visit_children(node);
            }
            "import_spec" => {
                if let Some(path) = node.child_by_field_name("path") {
                    let text = self.text(path).to_string();
                    self.result.deps.push(text);
                }
            }
            "comment" => self.visit_comment(node),
            "function_declaration" => {
                if self.scan_funcs {
                    if let Some(name) = node.child_by_field_name("name") {
                        let text = self.text(name).to_string();
                        self.result.funcs.push(text);
                    }
                }
            }
            kind if GROUP_KINDS.contains(&kind) => self.visit_children(node),
            _ => {}
        }
    }

    fn visit_children(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }

    fn record_package(&mut self, root: Node) {
        let mut cursor = root.walk();
        let clause = root
            .named_children(&mut cursor)
            .find(|child| child.kind() == "package_clause");
        let Some(clause) = clause else {
            return;
        };
        self.pkg_pos = clause.start_byte();

        let mut clause_cursor = clause.walk();
        let name = clause
            .named_children(&mut clause_cursor)
            .find(|child| child.kind() == "package_identifier");
        if let Some(name) = name {
            self.result.package = self.text(name).to_string();
        }
    }

    fn visit_comment(&mut self, node: Node) {
        let text = self.text(node);
        let position = position_of(node);

        if node.start_byte() < self.pkg_pos {
            // Header: only line comments may carry a target.
            let Some(body) = text.strip_prefix("//") else {
                return;
            };
            if let Some(target) = directive::parse_target(body.trim()) {
                self.result
                    .directives
                    .push(Directive::new(DirectiveKind::Target, target, position));
            }
            return;
        }

        if let Some(body) = text.strip_prefix("//") {
            self.handle_line(body.trim(), position);
        } else if text.len() >= 4 && text.starts_with("/*") && text.ends_with("*/") {
            let body = &text[2..text.len() - 2];
            for (offset, line) in body.lines().enumerate() {
                if line.len() > MAX_COMMENT_LINE {
                    tracing::warn!(
                        "Extra long comment ignored at {}:{}",
                        position.line + offset,
                        if offset == 0 { position.column } else { 1 }
                    );
                    return;
                }
                let line_position = Position {
                    line: position.line + offset,
                    column: if offset == 0 { position.column } else { 1 },
                };
                self.handle_line(line.trim(), line_position);
            }
        }
    }

    fn handle_line(&mut self, line: &str, position: Position) {
        let Some((kind, payload)) = directive::parse_cgo_line(line, self.tags) else {
            return;
        };
        self.result
            .directives
            .push(Directive::new(kind, payload, position));
    }

    fn text(&self, node: Node) -> &'a str {
        &self.source[node.start_byte()..node.end_byte()]
    }
}
