pub mod directive;
pub mod parser;
pub mod resolve;
pub mod tags;

pub use parser::{GoParser, ScannedSource};
pub use tags::BuildTags;

use gbuild_core::error::Result;
use gbuild_core::model::SourceUnit;
use gbuild_core::resolver::FlagResolver;
use std::path::Path;

const TEST_FILE_SUFFIX: &str = "_test.go";

/// Extracts package facts and build directives from Go sources.
///
/// Each call parses with its own tree-sitter parser, so one extractor can be
/// shared across threads.
#[derive(Clone)]
pub struct GoExtractor {
    parser: GoParser,
    tags: BuildTags,
}

impl GoExtractor {
    pub fn new(tags: BuildTags) -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
            tags,
        })
    }

    pub fn tags(&self) -> &BuildTags {
        &self.tags
    }

    /// Parses `source` and collects its package, imports, directives and,
    /// for test units, top-level function names. Never runs external tools.
    pub fn scan(&self, source: &str, is_test: bool) -> Result<ScannedSource> {
        let tree = self.parser.parse(source, is_test)?;
        Ok(parser::Walker::new(source, &self.tags, is_test).walk(&tree))
    }

    pub fn extract(
        &self,
        source: &str,
        is_test: bool,
        resolver: &dyn FlagResolver,
    ) -> Result<SourceUnit> {
        let scanned = self.scan(source, is_test)?;
        Ok(resolve::resolve(scanned, resolver))
    }

    /// Reads and extracts one file. It is scanned as a test unit when
    /// `test_mode` is on and the file name ends in `_test.go`.
    pub fn extract_file(
        &self,
        path: &Path,
        test_mode: bool,
        resolver: &dyn FlagResolver,
    ) -> Result<SourceUnit> {
        let source = std::fs::read_to_string(path)?;
        let is_test = test_mode && is_test_file(path);
        tracing::debug!("Scanning {} (test: {})", path.display(), is_test);
        self.extract(&source, is_test, resolver)
    }
}

pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(TEST_FILE_SUFFIX))
}
