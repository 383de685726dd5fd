//! Command-line interface for HomeShell
//!
//! Provides inspection commands for the dashboard content (tiles, weather,
//! configuration) alongside the default shell run mode.

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::{default_config_path, ConfigParser, ShellConfig};
use crate::models::shortcut::default_tiles;
use crate::models::weather::WeatherReport;
use crate::trace_performance;
use crate::ui::{ShortcutGridView, WeatherPanelView};
use crate::{HomeShellError, Result};

/// HomeShell command-line interface
#[derive(Parser)]
#[command(name = "homeshell")]
#[command(about = "Desktop-style personal dashboard shell")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "HomeShell Team")]
pub struct HomeShellCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable JSON output for machine-readable results
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommands; runs the shell when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the shortcut grid tiles
    Tiles,

    /// Print the weather report
    Weather,

    /// Configuration management commands
    Config(ConfigCommands),
}

/// Configuration management subcommands
#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub action: ConfigActions,
}

#[derive(Subcommand)]
pub enum ConfigActions {
    /// Show the effective configuration
    Show,

    /// Print the default configuration file path
    Path,
}

/// Load the shell configuration honoring the `--config` override. A missing
/// default file is not an error; defaults apply.
pub fn load_config(cli: &HomeShellCli) -> Result<ShellConfig> {
    let parser = ConfigParser::new();

    if let Some(path) = &cli.config {
        return parser
            .parse_shell_file(path)
            .map_err(|e| HomeShellError::ConfigurationError(e.to_string()).into());
    }

    match default_config_path() {
        Some(path) if path.exists() => parser
            .parse_shell_file(&path)
            .map_err(|e| HomeShellError::ConfigurationError(e.to_string()).into()),
        _ => {
            debug!("No configuration file found, using defaults");
            Ok(ShellConfig::default())
        }
    }
}

/// Execute a CLI subcommand
pub fn run_cli(cli: &HomeShellCli, command: &Commands) -> Result<()> {
    match command {
        Commands::Tiles => {
            let tiles = default_tiles();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tiles)?);
            } else {
                let rows = trace_performance!("render_tiles", { ShortcutGridView::rows(&tiles) });
                for row in rows {
                    println!("{row}");
                }
            }
        }
        Commands::Weather => {
            let report = WeatherReport::preset();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let view = WeatherPanelView::new(report);
                for line in view.frame(true).lines {
                    println!("{line}");
                }
            }
        }
        Commands::Config(config) => match &config.action {
            ConfigActions::Show => {
                let shell_config = load_config(cli)?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&shell_config)?);
                } else {
                    println!(
                        "{}",
                        toml::to_string_pretty(&shell_config)
                            .map_err(|e| HomeShellError::ConfigurationError(e.to_string()))?
                    );
                }
            }
            ConfigActions::Path => match default_config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No configuration directory available"),
            },
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = HomeShellCli::try_parse_from(["homeshell", "tiles", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Tiles)));
    }

    #[test]
    fn bare_invocation_runs_the_shell() {
        let cli = HomeShellCli::try_parse_from(["homeshell"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let cli = HomeShellCli::try_parse_from(["homeshell", "tiles"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "version = \"1\"\n\n[shell]\ngreeting_name = \"Ada\"\n"
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let cli = HomeShellCli::try_parse_from(["homeshell", "--config", &path, "tiles"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.greeting_name, "Ada");
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let cli =
            HomeShellCli::try_parse_from(["homeshell", "--config", "/nonexistent/config.toml"])
                .unwrap();
        assert!(load_config(&cli).is_err());
    }
}
