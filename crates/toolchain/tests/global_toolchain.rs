use gbuild_core::config::ToolchainConfig;
use gbuild_toolchain::{Tool, Toolchain};
use std::path::{Path, PathBuf};

// The process-wide toolchain is write-once, so this binary holds a single test.
#[test]
fn test_installed_toolchain_is_shared_and_write_once() {
    assert!(Toolchain::installed().is_none());

    let preset = Toolchain::with_bindings([
        (Tool::Compiler, PathBuf::from("/opt/go/bin/6g")),
        (Tool::PkgConfig, PathBuf::from("/opt/pc/bin/pkg-config")),
    ]);
    Toolchain::install_global(preset.clone()).unwrap();

    // An unsupported architecture would fail discovery; the preset is returned
    // without searching.
    let config = ToolchainConfig {
        goarch: "sparc".to_string(),
        ..Default::default()
    };
    let global = Toolchain::global(&config).unwrap();
    assert_eq!(global.bindings(), preset.bindings());
    assert_eq!(
        global.path(Tool::Compiler).unwrap(),
        Path::new("/opt/go/bin/6g")
    );
    assert!(std::ptr::eq(global, Toolchain::installed().unwrap()));

    let second = Toolchain::with_bindings([(Tool::Compiler, PathBuf::from("/usr/bin/6g"))]);
    let rejected = Toolchain::install_global(second.clone()).unwrap_err();
    assert_eq!(rejected.bindings(), second.bindings());
    assert_eq!(
        Toolchain::installed().unwrap().path(Tool::Compiler).unwrap(),
        Path::new("/opt/go/bin/6g")
    );
}
