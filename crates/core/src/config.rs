use crate::error::{GbuildError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Target platform and tool locations for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub goos: String,
    pub goarch: String,
    /// Fallback directory for toolchain binaries not on `PATH`.
    pub gobin: Option<PathBuf>,
    /// Extra build tags satisfied in addition to `goos`, `goarch` and `cgo`.
    pub tags: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            goos: host_goos().to_string(),
            goarch: host_goarch().to_string(),
            gobin: None,
            tags: Vec::new(),
        }
    }
}

impl ToolchainConfig {
    /// Reads `GOOS`, `GOARCH`, `GOBIN` and `GOROOT` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(goos) = non_empty("GOOS") {
            config.goos = goos;
        }
        if let Some(goarch) = non_empty("GOARCH") {
            config.goarch = goarch;
        }
        config.gobin = non_empty("GOBIN")
            .map(PathBuf::from)
            .or_else(|| non_empty("GOROOT").map(|root| PathBuf::from(root).join("bin")));
        config
    }

    /// Prefix letter of the architecture specific tools (`6g`, `8l`, `5a`, ...).
    pub fn arch_letter(&self) -> Result<char> {
        match self.goarch.as_str() {
            "amd64" => Ok('6'),
            "386" => Ok('8'),
            "arm" => Ok('5'),
            "arm64" => Ok('7'),
            other => Err(GbuildError::Config(format!(
                "unsupported architecture '{}'",
                other
            ))),
        }
    }
}

fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        other => other,
    }
}
