use gbuild_core::error::{GbuildError, Result};
use gbuild_core::resolver::FlagResolver;
use gbuild_go::{BuildTags, GoExtractor};
use std::collections::HashMap;

/// Extractor for a linux/amd64 build with cgo enabled.
#[allow(dead_code)]
pub fn linux_extractor() -> GoExtractor {
    GoExtractor::new(BuildTags::new(["linux", "amd64", "cgo"]))
        .expect("Go grammar should load")
}

/// pkg-config stand-in answering from a fixed table of libraries.
#[allow(dead_code)]
#[derive(Default)]
pub struct StubPkgConfig {
    libraries: HashMap<String, (String, String)>,
}

#[allow(dead_code)]
impl StubPkgConfig {
    pub fn with(mut self, library: &str, cflags: &str, libs: &str) -> Self {
        self.libraries
            .insert(library.to_string(), (cflags.to_string(), libs.to_string()));
        self
    }

    fn missing(library: &str) -> GbuildError {
        GbuildError::Subprocess {
            command: "pkg-config".to_string(),
            args: vec![library.to_string()],
            status: "exit status: 1".to_string(),
            stderr: format!("Package {} was not found in the pkg-config search path", library),
        }
    }
}

impl FlagResolver for StubPkgConfig {
    fn cflags(&self, library: &str) -> Result<String> {
        self.libraries
            .get(library)
            .map(|(cflags, _)| cflags.clone())
            .ok_or_else(|| Self::missing(library))
    }

    fn libs(&self, library: &str) -> Result<String> {
        self.libraries
            .get(library)
            .map(|(_, libs)| libs.clone())
            .ok_or_else(|| Self::missing(library))
    }
}
