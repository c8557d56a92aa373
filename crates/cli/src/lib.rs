mod exec;
mod scan;
mod tools;

use clap::{Args, Parser, Subcommand};
use gbuild_core::config::ToolchainConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gbuild",
    version,
    about = "Inspect Go build directives and drive the Go toolchain",
    long_about = "gbuild reads package clauses, imports and build directives (`// target:` and \
                  `#cgo` lines) from Go sources, locates the toolchain binaries, and runs \
                  external tools with uniform error reporting."
)]
pub struct Cli {
    /// Log every external command line
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub platform: PlatformArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the values read from GOOS, GOARCH and GOBIN.
#[derive(Args, Debug, Default)]
pub struct PlatformArgs {
    /// Target operating system
    #[arg(long, global = true, value_name = "GOOS")]
    pub goos: Option<String>,

    /// Target architecture (amd64, 386, arm, arm64)
    #[arg(long, global = true, value_name = "GOARCH")]
    pub goarch: Option<String>,

    /// Directory searched for toolchain binaries missing from PATH
    #[arg(long, global = true, value_name = "DIR")]
    pub gobin: Option<PathBuf>,

    /// Extra build tags satisfied by `#cgo` conditions
    #[arg(long = "tag", global = true, value_name = "TAG")]
    pub tags: Vec<String>,
}

impl PlatformArgs {
    pub fn to_config(&self) -> ToolchainConfig {
        let mut config = ToolchainConfig::from_env();
        if let Some(goos) = &self.goos {
            config.goos = goos.clone();
        }
        if let Some(goarch) = &self.goarch {
            config.goarch = goarch.clone();
        }
        if let Some(gobin) = &self.gobin {
            config.gobin = Some(gobin.clone());
        }
        config.tags.extend(self.tags.iter().cloned());
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract package, imports and build directives from Go files
    #[command(
        long_about = "Parses each file and prints its package name, imports, target override \
                      and deduplicated cgo compile/link flags as JSON. `#cgo pkg-config:` \
                      lines are resolved with pkg-config."
    )]
    Scan {
        /// Go source files to scan
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Treat *_test.go files as test units and list their top-level functions
        #[arg(long)]
        test: bool,
    },
    /// Locate the toolchain binaries and print where each one was found
    Tools {
        /// Print the bindings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run an external command through the toolchain runner
    #[command(
        long_about = "Runs COMMAND with ARGS. Every argument is split on whitespace before the \
                      command is started, so a quoted flag string expands to several arguments."
    )]
    Exec {
        /// Working directory for the command
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Capture stdout and stderr instead of streaming them
        #[arg(long)]
        capture: bool,

        /// Command to run
        #[arg(value_name = "COMMAND")]
        command: String,

        /// Arguments passed to the command
        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = gbuild_runtime::init_logging("cli", cli.verbose);
    let config = cli.platform.to_config();

    match cli.command {
        Commands::Scan { files, test } => scan::run(&config, &files, test),
        Commands::Tools { json } => tools::run(&config, json),
        Commands::Exec {
            dir,
            capture,
            command,
            args,
        } => exec::run(&command, dir.as_deref(), &args, capture),
    }
}
