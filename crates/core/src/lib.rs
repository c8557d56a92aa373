pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod resolver;

pub use config::ToolchainConfig;
pub use error::{GbuildError, Result};
pub use model::{Directive, DirectiveKind, Position, SourceUnit};
pub use resolver::{FlagResolver, NoopFlagResolver};
