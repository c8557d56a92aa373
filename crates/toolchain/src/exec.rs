use gbuild_core::error::{GbuildError, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Splits every argument on whitespace, so one caller argument may carry a
/// whole flag string such as `"-I/usr/include -DNDEBUG"`.
pub fn split_args<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split_whitespace())
        .map(str::to_string)
        .collect()
}

/// One external command. The child inherits the environment of this process.
#[derive(Debug, Clone)]
pub struct Invocation {
    command: OsString,
    working_dir: Option<PathBuf>,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(command: impl AsRef<OsStr>) -> Self {
        Self {
            command: command.as_ref().to_os_string(),
            working_dir: None,
            args: Vec::new(),
        }
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Appends `args` after whitespace tokenization.
    pub fn args<S: AsRef<str>>(mut self, args: &[S]) -> Self {
        self.args.extend(split_args(args));
        self
    }

    pub fn program(&self) -> String {
        self.command.to_string_lossy().into_owned()
    }

    pub fn argv(&self) -> &[String] {
        &self.args
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs with stdout and stderr streamed to this process's streams.
    pub fn run(&self) -> Result<()> {
        self.run_dump(Stdio::inherit())
    }

    /// Runs with stdout sent to `dump`; stderr is inherited.
    pub fn run_dump(&self, dump: impl Into<Stdio>) -> Result<()> {
        let mut cmd = self.command();
        cmd.stdout(dump.into()).stderr(Stdio::inherit());
        let status = cmd.status().map_err(|e| self.spawn_error(e))?;
        self.check(status, String::new())
    }

    /// Runs with both streams captured and returns stdout. On failure the
    /// error carries the captured stderr.
    pub fn output(&self) -> Result<Vec<u8>> {
        let mut cmd = self.command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        let output = cmd.output().map_err(|e| self.spawn_error(e))?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        self.check(output.status, stderr)?;
        Ok(output.stdout)
    }

    fn command(&self) -> Command {
        tracing::debug!("{}", self.command_line());
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(&self, err: std::io::Error) -> GbuildError {
        // A bad working directory fails the spawn with the same NotFound kind
        // as a missing program.
        let reason = match &self.working_dir {
            Some(dir) if !dir.is_dir() => format!(
                "failed to start in working directory '{}': {}",
                dir.display(),
                err
            ),
            _ => format!("failed to start: {}", err),
        };
        GbuildError::tool_not_found(self.program(), reason)
    }

    fn check(&self, status: ExitStatus, stderr: String) -> Result<()> {
        if status.success() {
            return Ok(());
        }
        Err(GbuildError::Subprocess {
            command: self.program(),
            args: self.args.clone(),
            status: status.to_string(),
            stderr,
        })
    }
}

fn build_invocation<S: AsRef<str>>(
    command: impl AsRef<OsStr>,
    wd: Option<&Path>,
    args: &[S],
) -> Invocation {
    let invocation = Invocation::new(command).args(args);
    match wd {
        Some(dir) => invocation.working_dir(dir),
        None => invocation,
    }
}

/// Runs `command` with inherited standard streams.
pub fn run<S: AsRef<str>>(
    command: impl AsRef<OsStr>,
    wd: Option<&Path>,
    args: &[S],
) -> Result<()> {
    build_invocation(command, wd, args).run()
}

/// Runs `command` with stdout redirected to `dump`.
pub fn run_dump<S: AsRef<str>>(
    command: impl AsRef<OsStr>,
    wd: Option<&Path>,
    args: &[S],
    dump: impl Into<Stdio>,
) -> Result<()> {
    build_invocation(command, wd, args).run_dump(dump)
}

/// Runs `command` and returns its captured stdout.
pub fn run_capturing_stdout<S: AsRef<str>>(
    command: impl AsRef<OsStr>,
    wd: Option<&Path>,
    args: &[S],
) -> Result<Vec<u8>> {
    build_invocation(command, wd, args).output()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_args() {
        let args = split_args(&["-o main.6", "", "  -I/usr/include\t-DX ", "main.go"]);
        assert_eq!(args, vec!["-o", "main.6", "-I/usr/include", "-DX", "main.go"]);
    }

    #[test]
    fn test_command_line() {
        let invocation = Invocation::new("/usr/bin/6l").args(&["-o prog", "main.6"]);
        assert_eq!(invocation.command_line(), "/usr/bin/6l -o prog main.6");
        assert_eq!(invocation.argv().to_vec(), vec!["-o", "prog", "main.6"]);
    }

    #[test]
    fn test_missing_command_is_tool_not_found() {
        let err = run("gbuild-no-such-tool", None, &[] as &[&str]).unwrap_err();
        assert!(err.is_tool_not_found(), "got {err:?}");
        assert!(err.to_string().contains("gbuild-no-such-tool"));
    }
}
