//! Conditional build tags on `#cgo` lines.
//!
//! A tag expression is a comma separated conjunction of terms, each optionally
//! negated with `!`: `linux`, `!windows`, `linux,amd64`.

use gbuild_core::ToolchainConfig;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTags {
    satisfied: HashSet<String>,
}

impl BuildTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            satisfied: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Tags satisfied by a build for the configured platform, with cgo enabled.
    pub fn from_config(config: &ToolchainConfig) -> Self {
        let mut tags = Self::new([config.goos.as_str(), config.goarch.as_str(), "cgo"]);
        tags.satisfied.extend(config.tags.iter().cloned());
        tags
    }

    /// Returns true when every term of `expr` holds. Malformed expressions never hold.
    pub fn matches(&self, expr: &str) -> bool {
        if expr.is_empty() {
            return false;
        }
        expr.split(',').all(|term| self.term_holds(term))
    }

    fn term_holds(&self, term: &str) -> bool {
        let (negated, name) = match term.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, term),
        };
        if !is_valid_tag(name) {
            return false;
        }
        self.satisfied.contains(name) != negated
    }
}

impl Default for BuildTags {
    fn default() -> Self {
        Self::from_config(&ToolchainConfig::default())
    }
}

fn is_valid_tag(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
