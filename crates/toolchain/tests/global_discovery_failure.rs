use gbuild_core::config::ToolchainConfig;
use gbuild_core::error::GbuildError;
use gbuild_toolchain::Toolchain;

// The process-wide toolchain is write-once, so this binary holds a single test.
#[test]
fn test_failed_discovery_is_not_retried() {
    let unsupported = ToolchainConfig {
        goarch: "sparc".to_string(),
        ..Default::default()
    };
    let err = Toolchain::global(&unsupported).unwrap_err();
    assert!(matches!(err, GbuildError::Config(_)), "got {err:?}");

    // A supported config would search the path again and fail differently or
    // succeed; the first outcome is reported instead.
    let amd64 = ToolchainConfig {
        goarch: "amd64".to_string(),
        ..Default::default()
    };
    let err = Toolchain::global(&amd64).unwrap_err();
    assert!(
        matches!(err, GbuildError::Config(ref message) if message.contains("sparc")),
        "got {err:?}"
    );

    assert!(Toolchain::installed().is_none());
    let preset = Toolchain::default();
    assert!(Toolchain::install_global(preset).is_err());
}
