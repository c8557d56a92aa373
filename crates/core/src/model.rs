use serde::{Deserialize, Serialize};

/// 1-based line and column of a node in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    /// `// target: <name>` before the package clause.
    Target,
    /// `#cgo CFLAGS: ...`
    CompileFlags,
    /// `#cgo LDFLAGS: ...`
    LinkFlags,
    /// `#cgo pkg-config: lib...`
    PkgConfig,
}

/// One build instruction recognized in a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// Text following the directive prefix, trimmed.
    pub payload: String,
    pub position: Position,
}

impl Directive {
    pub fn new(kind: DirectiveKind, payload: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            payload: payload.into(),
            position,
        }
    }

    /// Library names of a `pkg-config` directive; empty for other kinds.
    pub fn libraries(&self) -> Vec<&str> {
        match self.kind {
            DirectiveKind::PkgConfig => self.payload.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }
}

/// Facts extracted from a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub package: String,
    pub target: Option<String>,
    /// Import paths exactly as written, quotes included.
    pub deps: Vec<String>,
    /// Top-level function names, only collected for test units.
    pub funcs: Vec<String>,
    pub cflags: Vec<String>,
    pub ldflags: Vec<String>,
}
