use std::io::Write;
use std::path::Path;

pub fn run(
    command: &str,
    dir: Option<&Path>,
    args: &[String],
    capture: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if capture {
        let stdout = gbuild_toolchain::run_capturing_stdout(command, dir, args)?;
        std::io::stdout().write_all(&stdout)?;
    } else {
        gbuild_toolchain::run(command, dir, args)?;
    }
    Ok(())
}
