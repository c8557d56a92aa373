pub mod discovery;
pub mod exec;
pub mod pkg_config;
pub mod tool;

pub use discovery::{ToolBinding, ToolLocator, Toolchain};
pub use exec::{Invocation, run, run_capturing_stdout, run_dump, split_args};
pub use pkg_config::PkgConfig;
pub use tool::Tool;
