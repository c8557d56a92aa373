use crate::discovery::Toolchain;
use crate::exec::Invocation;
use crate::tool::Tool;
use gbuild_core::error::{GbuildError, Result};
use gbuild_core::resolver::FlagResolver;
use std::path::PathBuf;

const DEFAULT_COMMAND: &str = "pkg-config";

/// Runs `pkg-config --cflags|--libs <library>` for `#cgo pkg-config:` lines.
#[derive(Debug, Clone)]
pub struct PkgConfig {
    command: PathBuf,
}

impl PkgConfig {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Uses the discovered binary, or `pkg-config` from `PATH` at run time.
    pub fn from_toolchain(toolchain: &Toolchain) -> Self {
        match toolchain.path(Tool::PkgConfig) {
            Ok(path) => Self::new(path),
            Err(_) => Self::new(DEFAULT_COMMAND),
        }
    }

    fn query(&self, mode: &str, library: &str) -> Result<String> {
        let invocation = Invocation::new(&self.command).args(&[mode, library]);
        let stdout = invocation.output()?;
        let text = String::from_utf8(stdout).map_err(|e| GbuildError::MalformedOutput {
            command: invocation.command_line(),
            reason: e.to_string(),
        })?;
        Ok(text.trim().to_string())
    }
}

impl Default for PkgConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND)
    }
}

impl FlagResolver for PkgConfig {
    fn cflags(&self, library: &str) -> Result<String> {
        self.query("--cflags", library)
    }

    fn libs(&self, library: &str) -> Result<String> {
        self.query("--libs", library)
    }
}

impl FlagResolver for Toolchain {
    fn cflags(&self, library: &str) -> Result<String> {
        PkgConfig::from_toolchain(self).cflags(library)
    }

    fn libs(&self, library: &str) -> Result<String> {
        PkgConfig::from_toolchain(self).libs(library)
    }
}
