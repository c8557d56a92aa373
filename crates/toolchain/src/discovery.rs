//! Locating toolchain binaries.
//!
//! Each tool is looked up on the executable search path first and, for the
//! Go tools, in the configured binary directory second. Discovery runs once;
//! the resulting [`Toolchain`] is immutable.

use crate::tool::Tool;
use gbuild_core::config::ToolchainConfig;
use gbuild_core::error::{GbuildError, Result};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Outcome of the one discovery run of this process, failures included.
static GLOBAL: OnceCell<Result<Toolchain>> = OnceCell::new();

/// Resolved location of one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolBinding {
    pub tool: Tool,
    /// Executable name that was searched for.
    pub name: String,
    /// `None` when the tool could not be found.
    pub path: Option<PathBuf>,
}

impl ToolBinding {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Where to look for executables.
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    pub search_path: Vec<PathBuf>,
    pub gobin: Option<PathBuf>,
}

impl ToolLocator {
    pub fn new(search_path: Vec<PathBuf>, gobin: Option<PathBuf>) -> Self {
        Self { search_path, gobin }
    }

    /// Uses the process `PATH` and the configured binary directory.
    pub fn from_env(config: &ToolchainConfig) -> Self {
        let search_path = std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self::new(search_path, config.gobin.clone())
    }

    pub fn find(&self, tool: Tool, name: &str) -> Result<PathBuf> {
        let file_name = executable_file_name(name);
        if let Some(path) = self
            .search_path
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| is_executable(candidate))
        {
            return Ok(path);
        }

        if tool.searches_gobin() {
            if let Some(gobin) = &self.gobin {
                let candidate = gobin.join(&file_name);
                if candidate.exists() {
                    return Ok(candidate);
                }
            }
        }

        Err(GbuildError::tool_not_found(
            name,
            "not found in PATH or tool directory",
        ))
    }
}

/// Immutable set of tool bindings produced by discovery.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Toolchain {
    bindings: Vec<ToolBinding>,
}

impl Toolchain {
    /// Discovers tools from the process environment.
    pub fn discover(config: &ToolchainConfig) -> Result<Self> {
        Self::discover_with(config, &ToolLocator::from_env(config))
    }

    /// Resolves the required tools, failing on the first one missing, then
    /// the optional ones on a best-effort basis.
    pub fn discover_with(config: &ToolchainConfig, locator: &ToolLocator) -> Result<Self> {
        let arch = config.arch_letter()?;
        let mut bindings = Vec::with_capacity(Tool::REQUIRED.len() + Tool::OPTIONAL.len());

        for tool in Tool::REQUIRED {
            let name = tool.binary_name(arch);
            match locator.find(tool, &name) {
                Ok(path) => {
                    tracing::debug!("Found {} at {}", tool, path.display());
                    bindings.push(ToolBinding {
                        tool,
                        name,
                        path: Some(path),
                    });
                }
                Err(e) => {
                    tracing::error!("Could not find '{}' in path", name);
                    return Err(e);
                }
            }
        }

        for tool in Tool::OPTIONAL {
            let name = tool.binary_name(arch);
            let path = match locator.find(tool, &name) {
                Ok(path) => {
                    tracing::debug!("Found {} at {}", tool, path.display());
                    Some(path)
                }
                Err(_) => {
                    tracing::warn!("Could not find '{}' in path", name);
                    None
                }
            };
            bindings.push(ToolBinding { tool, name, path });
        }

        Ok(Self { bindings })
    }

    /// Builds a toolchain from known paths. Tools not listed are not found.
    pub fn with_bindings<I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (Tool, PathBuf)>,
    {
        let bindings = bindings
            .into_iter()
            .map(|(tool, path)| ToolBinding {
                tool,
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path: Some(path),
            })
            .collect();
        Self { bindings }
    }

    /// Discovers once per process and returns the shared toolchain. Later
    /// calls return the first outcome regardless of `config`; a failed
    /// discovery is reported again without searching a second time.
    pub fn global(config: &ToolchainConfig) -> Result<&'static Toolchain> {
        GLOBAL
            .get_or_init(|| Self::discover(config))
            .as_ref()
            .map_err(replay_error)
    }

    /// Publishes `toolchain` as the process-wide instance. Returns it back if
    /// discovery already ran or another toolchain was installed.
    pub fn install_global(toolchain: Toolchain) -> std::result::Result<(), Toolchain> {
        GLOBAL
            .set(Ok(toolchain))
            .map_err(|rejected| rejected.unwrap_or_default())
    }

    /// The process-wide toolchain, if one was discovered or installed.
    pub fn installed() -> Option<&'static Toolchain> {
        GLOBAL.get().and_then(|outcome| outcome.as_ref().ok())
    }

    pub fn bindings(&self) -> &[ToolBinding] {
        &self.bindings
    }

    pub fn binding(&self, tool: Tool) -> Option<&ToolBinding> {
        self.bindings.iter().find(|b| b.tool == tool)
    }

    /// Path of `tool`, or `ToolNotFound` when discovery did not locate it.
    pub fn path(&self, tool: Tool) -> Result<&Path> {
        self.binding(tool)
            .and_then(|b| b.path.as_deref())
            .ok_or_else(|| {
                let name = self
                    .binding(tool)
                    .map(|b| b.name.clone())
                    .unwrap_or_else(|| tool.to_string());
                GbuildError::tool_not_found(name, "not discovered")
            })
    }
}

/// Copy of a cached discovery failure for a new caller.
fn replay_error(err: &GbuildError) -> GbuildError {
    match err {
        GbuildError::ToolNotFound { tool, reason } => GbuildError::ToolNotFound {
            tool: tool.clone(),
            reason: reason.clone(),
        },
        GbuildError::Config(message) => GbuildError::Config(message.clone()),
        other => GbuildError::Config(format!("tool discovery failed: {}", other)),
    }
}

fn executable_file_name(name: &str) -> OsString {
    let mut file_name = OsString::from(name);
    file_name.push(std::env::consts::EXE_SUFFIX);
    file_name
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
