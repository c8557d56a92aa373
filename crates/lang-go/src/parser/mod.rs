use gbuild_core::error::{GbuildError, Result};
use gbuild_core::model::Position;
use tree_sitter::{Node, Parser, Tree};

mod walker;

pub use walker::ScannedSource;
pub(crate) use walker::Walker;

/// Top-level declarations that end the file header.
const BODY_DECLARATIONS: &[&str] = &[
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "var_declaration",
    "const_declaration",
];

const BODY_KEYWORDS: &[&str] = &["func", "type", "var", "const"];

#[derive(Clone)]
pub struct GoParser {
    pub language: tree_sitter::Language,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        // Fail early on an ABI mismatch rather than on the first file.
        Parser::new()
            .set_language(&language)
            .map_err(|e| GbuildError::Config(format!("Go grammar unavailable: {}", e)))?;
        Ok(Self { language })
    }

    /// Parses `source`, rejecting syntax errors in the header, or anywhere when
    /// `whole_file` is set.
    pub fn parse(&self, source: &str, whole_file: bool) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| GbuildError::Config(format!("Go grammar unavailable: {}", e)))?;

        let tree = parser.parse(source, None).ok_or_else(|| GbuildError::Parse {
            line: 1,
            column: 1,
            message: "parser produced no tree".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            // Without a body declaration the header runs to EOF, and so do the
            // MISSING nodes inserted there.
            let limit = if whole_file {
                None
            } else {
                header_end(root, source)
            };
            let fatal = first_error(root)
                .filter(|n| limit.is_none_or(|end| n.start_byte() < end));
            if let Some(node) = fatal {
                return Err(syntax_error(node, source));
            }
        }

        check_package_clause(root)?;
        Ok(tree)
    }
}

pub(crate) fn position_of(node: Node) -> Position {
    let point = node.start_position();
    Position {
        line: point.row + 1,
        column: point.column + 1,
    }
}

/// Byte offset where the first top-level declaration after the imports starts,
/// or `None` when the file has no such declaration.
fn header_end(root: Node, source: &str) -> Option<usize> {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let kind = child.kind();
        if BODY_DECLARATIONS.contains(&kind) {
            return Some(child.start_byte());
        }
        if child.is_error() {
            let text = &source[child.start_byte()..];
            if BODY_KEYWORDS.iter().any(|kw| starts_with_keyword(text, kw)) {
                return Some(child.start_byte());
            }
        }
    }
    None
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_prefix(keyword)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

fn syntax_error(node: Node, source: &str) -> GbuildError {
    let position = position_of(node);
    let message = if node.is_missing() {
        format!("expected '{}'", node.kind())
    } else {
        let snippet: String = source[node.start_byte()..node.end_byte()]
            .chars()
            .take(20)
            .collect();
        format!("syntax error near '{}'", snippet.trim())
    };
    GbuildError::Parse {
        line: position.line,
        column: position.column,
        message,
    }
}

/// The package clause must be the first thing in the file apart from comments.
fn check_package_clause(root: Node) -> Result<()> {
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "comment" => continue,
            "package_clause" => return Ok(()),
            _ => {
                let position = position_of(child);
                return Err(GbuildError::Parse {
                    line: position.line,
                    column: position.column,
                    message: "expected 'package'".to_string(),
                });
            }
        }
    }
    Err(GbuildError::Parse {
        line: root.end_position().row + 1,
        column: root.end_position().column + 1,
        message: "expected 'package', found EOF".to_string(),
    })
}
