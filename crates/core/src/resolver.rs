use crate::error::Result;

/// Resolves native library names to compiler and linker flags.
///
/// The toolchain implements this by running `pkg-config`; tests plug in fakes.
pub trait FlagResolver: Send + Sync {
    /// Output of `pkg-config --cflags <library>`, trimmed.
    fn cflags(&self, library: &str) -> Result<String>;

    /// Output of `pkg-config --libs <library>`, trimmed.
    fn libs(&self, library: &str) -> Result<String>;
}

/// Resolver that knows no libraries. Every lookup fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFlagResolver;

impl FlagResolver for NoopFlagResolver {
    fn cflags(&self, library: &str) -> Result<String> {
        Err(crate::error::GbuildError::tool_not_found(
            "pkg-config",
            format!("no resolver configured for '{}'", library),
        ))
    }

    fn libs(&self, library: &str) -> Result<String> {
        self.cflags(library)
    }
}
