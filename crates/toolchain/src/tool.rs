use serde::Serialize;
use std::fmt;

/// Logical external tools the build drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    Compiler,
    Assembler,
    Linker,
    Archiver,
    Cgo,
    Make,
    Installer,
    Formatter,
    Fixer,
    Gcc,
    CCompiler,
    Protoc,
    PkgConfig,
    Copy,
}

impl Tool {
    /// Tools without which nothing can be built, in discovery order.
    pub const REQUIRED: [Tool; 4] = [Tool::Compiler, Tool::Assembler, Tool::Linker, Tool::Archiver];

    pub const OPTIONAL: [Tool; 10] = [
        Tool::Cgo,
        Tool::Make,
        Tool::Installer,
        Tool::Formatter,
        Tool::Fixer,
        Tool::Gcc,
        Tool::CCompiler,
        Tool::Protoc,
        Tool::PkgConfig,
        Tool::Copy,
    ];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// Executable name for an architecture letter (`6` for amd64, `8` for 386, ...).
    pub fn binary_name(self, arch: char) -> String {
        match self {
            Tool::Compiler => format!("{}g", arch),
            Tool::Assembler => format!("{}a", arch),
            Tool::Linker => format!("{}l", arch),
            Tool::CCompiler => format!("{}c", arch),
            Tool::Archiver => "gopack".to_string(),
            Tool::Cgo => "cgo".to_string(),
            Tool::Make => "gomake".to_string(),
            Tool::Installer => "goinstall".to_string(),
            Tool::Formatter => "gofmt".to_string(),
            Tool::Fixer => "gofix".to_string(),
            Tool::Gcc => "gcc".to_string(),
            Tool::Protoc => "protoc".to_string(),
            Tool::PkgConfig => "pkg-config".to_string(),
            Tool::Copy => "cp".to_string(),
        }
    }

    /// Whether the tool binary directory is searched after `PATH`.
    /// Host utilities are only taken from `PATH`.
    pub fn searches_gobin(self) -> bool {
        !matches!(self, Tool::Gcc | Tool::Protoc | Tool::PkgConfig | Tool::Copy)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Compiler => "compiler",
            Tool::Assembler => "assembler",
            Tool::Linker => "linker",
            Tool::Archiver => "archiver",
            Tool::Cgo => "cgo",
            Tool::Make => "make",
            Tool::Installer => "installer",
            Tool::Formatter => "formatter",
            Tool::Fixer => "fixer",
            Tool::Gcc => "gcc",
            Tool::CCompiler => "c-compiler",
            Tool::Protoc => "protoc",
            Tool::PkgConfig => "pkg-config",
            Tool::Copy => "copy",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arch_specific_names() {
        assert_eq!(Tool::Compiler.binary_name('6'), "6g");
        assert_eq!(Tool::Assembler.binary_name('8'), "8a");
        assert_eq!(Tool::Linker.binary_name('5'), "5l");
        assert_eq!(Tool::CCompiler.binary_name('6'), "6c");
        assert_eq!(Tool::Archiver.binary_name('6'), "gopack");
    }

    #[test]
    fn test_required_and_optional_are_disjoint() {
        for tool in Tool::OPTIONAL {
            assert!(!tool.is_required(), "{tool} listed as both");
        }
        assert!(Tool::REQUIRED.iter().all(|t| t.searches_gobin()));
        assert!(!Tool::PkgConfig.searches_gobin());
    }
}
