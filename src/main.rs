// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { db_path }) => commands::cmd_init(db_path),
        Some(Commands::Update { db_path }) => commands::cmd_update(db_path),
        Some(Commands::List { db_path }) => commands::cmd_list(db_path),
        Some(Commands::Search { prefix, db_path }) => commands::cmd_search(&prefix, db_path),
        Some(Commands::View { id, db_path }) => commands::cmd_view(id, db_path),
        Some(Commands::Delete { id, db_path }) => commands::cmd_delete(id, db_path),
        Some(Commands::Apod) => commands::cmd_apod(),
        Some(Commands::Ping) => commands::cmd_ping(),
        Some(Commands::SetKey { key }) => commands::cmd_set_key(&key),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "apodary", &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("Apodary v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'apodary --help' for usage information");
            Ok(())
        }
    }
}
