//! Notewright CLI — the outer harness.
//!
//! Commands:
//! - `chat`   — Interactive chat or single-message mode
//! - `skills` — List loaded skills
//! - `tools`  — Connect to configured tool servers and show their status

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "notewright",
    about = "Notewright — AI assistant for your note vault",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Vault root directory (defaults to the current directory)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the configured AI backend
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List loaded skills
    Skills,

    /// Connect to configured tool servers and show their status
    Tools,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let vault_root = match cli.vault {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Chat { message } => commands::chat::run(vault_root, message).await,
        Commands::Skills => commands::skills::run(vault_root).await,
        Commands::Tools => commands::tools::run().await,
    }
}
