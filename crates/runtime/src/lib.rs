use gbuild_core::config::ToolchainConfig;
use gbuild_core::error::{GbuildError, Result};
use gbuild_core::model::SourceUnit;
use gbuild_go::{BuildTags, GoExtractor};
use gbuild_toolchain::{PkgConfig, Tool, Toolchain};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Extractor and toolchain configured for one target platform.
///
/// This is the entry point used by the CLI: it wires the Go extractor to the
/// `pkg-config` of the discovered toolchain.
pub struct BuildSession {
    extractor: GoExtractor,
    toolchain: Option<&'static Toolchain>,
    pkg_config: PkgConfig,
}

impl BuildSession {
    /// Session for extraction only. `pkg-config` is taken from `PATH`.
    pub fn for_scanning(config: &ToolchainConfig) -> Result<Self> {
        Ok(Self {
            extractor: GoExtractor::new(BuildTags::from_config(config))?,
            toolchain: None,
            pkg_config: PkgConfig::default(),
        })
    }

    /// Session backed by the process-wide toolchain, discovering it on first use.
    pub fn with_toolchain(config: &ToolchainConfig) -> Result<Self> {
        let toolchain = Toolchain::global(config)?;
        Ok(Self {
            extractor: GoExtractor::new(BuildTags::from_config(config))?,
            toolchain: Some(toolchain),
            pkg_config: PkgConfig::from_toolchain(toolchain),
        })
    }

    pub fn extractor(&self) -> &GoExtractor {
        &self.extractor
    }

    pub fn toolchain(&self) -> Result<&Toolchain> {
        self.toolchain
            .ok_or_else(|| GbuildError::tool_not_found("toolchain", "tool discovery was not run"))
    }

    pub fn extract_source(&self, source: &str, is_test: bool) -> Result<SourceUnit> {
        self.extractor.extract(source, is_test, &self.pkg_config)
    }

    pub fn extract_file(&self, path: &Path, test_mode: bool) -> Result<SourceUnit> {
        self.extractor.extract_file(path, test_mode, &self.pkg_config)
    }

    /// Extracts every file in parallel. Results keep the order of `paths`.
    pub fn extract_files(
        &self,
        paths: &[PathBuf],
        test_mode: bool,
    ) -> Vec<(PathBuf, Result<SourceUnit>)> {
        paths
            .par_iter()
            .map(|path| (path.clone(), self.extract_file(path, test_mode)))
            .collect()
    }

    /// Runs a discovered tool, streaming its output.
    pub fn run_tool<S: AsRef<str>>(
        &self,
        tool: Tool,
        wd: Option<&Path>,
        args: &[S],
    ) -> Result<()> {
        let path = self.toolchain()?.path(tool)?;
        gbuild_toolchain::run(path, wd, args)
    }
}

/// Installs file and stderr logging for `component`. Keep the returned guard
/// alive until exit so buffered lines reach the log file.
pub fn init_logging(component: &str, verbose: bool) -> Option<impl Drop> {
    Some(gbuild_core::logging::init_logging(component, verbose))
}
