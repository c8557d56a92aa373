use gbuild_core::config::ToolchainConfig;
use gbuild_core::model::SourceUnit;
use gbuild_runtime::BuildSession;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Serialize)]
struct ScanReport<'a> {
    file: &'a Path,
    #[serde(flatten)]
    unit: &'a SourceUnit,
}

pub fn run(
    config: &ToolchainConfig,
    files: &[PathBuf],
    test_mode: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Scanning needs pkg-config at most; prefer the discovered one when the
    // full toolchain is present.
    let session = match BuildSession::with_toolchain(config) {
        Ok(session) => session,
        Err(e) => {
            warn!("Toolchain unavailable ({}), using pkg-config from PATH", e);
            BuildSession::for_scanning(config)?
        }
    };

    info!("Scanning {} file(s)...", files.len());
    let mut failures = 0;
    for (path, result) in session.extract_files(files, test_mode) {
        match result {
            Ok(unit) => {
                let report = ScanReport {
                    file: &path,
                    unit: &unit,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{}:{}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} file(s) could not be scanned", failures).into());
    }
    Ok(())
}
