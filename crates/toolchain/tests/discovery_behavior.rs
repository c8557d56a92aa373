#![cfg(unix)]

use gbuild_core::config::ToolchainConfig;
use gbuild_core::error::GbuildError;
use gbuild_toolchain::{Tool, ToolLocator, Toolchain};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

fn amd64() -> ToolchainConfig {
    ToolchainConfig {
        goos: "linux".to_string(),
        goarch: "amd64".to_string(),
        gobin: None,
        tags: Vec::new(),
    }
}

fn install(dir: &Path, names: &[&str]) {
    for name in names {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}

#[test]
fn test_required_tools_found_on_search_path() {
    let bin = tempfile::tempdir().unwrap();
    install(bin.path(), &["6g", "6a", "6l", "gopack", "gofmt", "pkg-config"]);

    let locator = ToolLocator::new(vec![bin.path().to_path_buf()], None);
    let toolchain = Toolchain::discover_with(&amd64(), &locator).unwrap();

    assert_eq!(
        toolchain.path(Tool::Compiler).unwrap(),
        bin.path().join("6g")
    );
    assert_eq!(
        toolchain.path(Tool::Archiver).unwrap(),
        bin.path().join("gopack")
    );
    assert!(toolchain.binding(Tool::Formatter).unwrap().is_found());
    assert!(toolchain.binding(Tool::PkgConfig).unwrap().is_found());

    let cgo = toolchain.binding(Tool::Cgo).unwrap();
    assert_eq!(cgo.name, "cgo");
    assert!(!cgo.is_found());
    assert!(toolchain.path(Tool::Protoc).unwrap_err().is_tool_not_found());

    assert_eq!(
        toolchain.bindings().len(),
        Tool::REQUIRED.len() + Tool::OPTIONAL.len()
    );
}

#[test]
fn test_first_missing_required_tool_aborts() {
    let bin = tempfile::tempdir().unwrap();
    install(bin.path(), &["6g", "6a", "gopack"]);

    let locator = ToolLocator::new(vec![bin.path().to_path_buf()], None);
    let err = Toolchain::discover_with(&amd64(), &locator).unwrap_err();
    match err {
        GbuildError::ToolNotFound { tool, .. } => assert_eq!(tool, "6l"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_gobin_fallback_for_go_tools_only() {
    let path_dir = tempfile::tempdir().unwrap();
    let gobin = tempfile::tempdir().unwrap();
    install(path_dir.path(), &["8a", "gopack"]);
    install(gobin.path(), &["8g", "8l", "8a", "gcc", "cp"]);

    let config = ToolchainConfig {
        goarch: "386".to_string(),
        ..amd64()
    };
    let locator = ToolLocator::new(
        vec![path_dir.path().to_path_buf()],
        Some(gobin.path().to_path_buf()),
    );
    let toolchain = Toolchain::discover_with(&config, &locator).unwrap();

    assert_eq!(
        toolchain.path(Tool::Compiler).unwrap(),
        gobin.path().join("8g")
    );
    // PATH wins over the tool directory.
    assert_eq!(
        toolchain.path(Tool::Assembler).unwrap(),
        path_dir.path().join("8a")
    );
    assert!(!toolchain.binding(Tool::Gcc).unwrap().is_found());
    assert!(!toolchain.binding(Tool::Copy).unwrap().is_found());
}

#[test]
fn test_non_executable_files_skipped_on_search_path() {
    let bin = tempfile::tempdir().unwrap();
    install(bin.path(), &["6a", "6l", "gopack"]);
    std::fs::write(bin.path().join("6g"), "not a program").unwrap();
    std::fs::set_permissions(
        bin.path().join("6g"),
        std::fs::Permissions::from_mode(0o644),
    )
    .unwrap();

    let locator = ToolLocator::new(vec![bin.path().to_path_buf()], None);
    let err = Toolchain::discover_with(&amd64(), &locator).unwrap_err();
    assert!(matches!(err, GbuildError::ToolNotFound { ref tool, .. } if tool == "6g"));
}
