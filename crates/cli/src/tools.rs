use gbuild_core::config::ToolchainConfig;
use gbuild_toolchain::Toolchain;
use tracing::info;

pub fn run(config: &ToolchainConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Discovering toolchain for {}/{}...",
        config.goos, config.goarch
    );
    let toolchain = Toolchain::global(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(toolchain)?);
        return Ok(());
    }

    for binding in toolchain.bindings() {
        let location = binding
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "not found".to_string());
        let marker = if binding.tool.is_required() { "*" } else { " " };
        println!("{} {:<12} {:<12} {}", marker, binding.tool, binding.name, location);
    }
    Ok(())
}
