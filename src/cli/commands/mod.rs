//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod fetch;
mod init;
mod list;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "portalgrab")]
#[command(about = "Download files published behind an authenticated portal")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Log in, scrape a portal page and download its first file
    Fetch {
        /// Page name appended to the configured resource URL
        page: Option<String>,
    },

    /// List downloaded files
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: 127.0.0.1:3030)
        #[arg(long)]
        bind: Option<String>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let (settings, _config) = load_settings_with_options(options).await?;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Fetch { page } => fetch::cmd_fetch(&settings, page.as_deref()).await,
        Commands::List { json } => list::cmd_list(&settings, json).await,
        Commands::Serve { bind } => {
            let bind = bind
                .or_else(|| settings.bind.clone())
                .unwrap_or_else(|| serve::DEFAULT_BIND.to_string());
            serve::cmd_serve(&settings, &bind).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from(["portalgrab", "-v", "fetch", "reports"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Fetch { page: Some(ref p) } if p == "reports"));

        let cli = Cli::try_parse_from(["portalgrab", "fetch"]).unwrap();
        assert!(matches!(cli.command, Commands::Fetch { page: None }));
    }

    #[test]
    fn test_parse_global_config() {
        let cli =
            Cli::try_parse_from(["portalgrab", "list", "--json", "-c", "/etc/pg.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/pg.toml")));
        assert!(matches!(cli.command, Commands::List { json: true }));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["portalgrab", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref b) } if b == "0.0.0.0:8080"));
    }
}
