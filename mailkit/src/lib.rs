pub mod cli;
pub mod config;

pub use cli::{Cli, Commands, Report, run};
pub use config::{Config, ConfigError};
