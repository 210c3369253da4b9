pub mod commands;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AdapterConfig;

#[derive(Parser)]
#[command(name = "dify-app-adapter")]
#[command(about = "Read-only HTTP adapter exposing API-enabled apps and their keys")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Bind host (overrides ADAPTER_HOST)")]
    pub host: Option<String>,

    #[arg(long, global = true, help = "Bind port (overrides ADAPTER_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Connect to the database and run a trivial query")]
    CheckDb,

    #[command(about = "Print the effective configuration with secrets masked")]
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl Cli {
    /// Apply command line overrides on top of the environment configuration
    pub fn apply_overrides(&self, mut config: AdapterConfig) -> AdapterConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        config
    }
}

pub async fn run(cli: Cli, config: AdapterConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = cli.apply_overrides(config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::CheckDb => commands::check_db::handle(config, output_format).await,
        Commands::Config => commands::config::handle(config, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AdapterConfig {
        AdapterConfig::from_vars(|_| None)
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["dify-app-adapter"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Text);
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::try_parse_from(["dify-app-adapter", "serve", "--port", "9000", "--host", "127.0.0.1"]).unwrap();
        let config = cli.apply_overrides(config());
        assert_eq!(config.server.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn parses_check_db_with_json() {
        let cli = Cli::try_parse_from(["dify-app-adapter", "check-db", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::CheckDb)));
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
    }
}
