//! CLI interface for price-tracker
//!
//! Provides subcommands for:
//! - `run`: Track prices and print every view change
//! - `config`: Show the effective configuration

mod run;

pub use run::{render_table, RunArgs};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "price-tracker")]
#[command(about = "Live stock price tracker with a synthetic random-walk feed")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect, optionally start the feed, and print views
    Run(RunArgs),
    /// Show configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_command_with_path() {
        let cli = Cli::parse_from(["price-tracker", "-c", "other.toml", "config"]);
        assert_eq!(cli.config, "other.toml");
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn test_default_config_path() {
        let cli = Cli::parse_from(["price-tracker", "run", "--json"]);
        assert_eq!(cli.config, "config.toml");
        match cli.command {
            Commands::Run(args) => assert!(args.json),
            Commands::Config => panic!("expected run"),
        }
    }
}
