//! Configuration management for HomeShell

pub mod parser;

pub use parser::{default_config_path, ConfigFile, ConfigParseError, ConfigParser, ShellConfig};
