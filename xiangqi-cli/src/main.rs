//! Xiangqi CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP game server
//! - play: Run AI-vs-AI games from the initial position

mod play_cmd;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xiangqi")]
#[command(about = "Xiangqi rule engine and minimax AI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP game server
    Serve(server::ServerArgs),
    /// Play AI against AI
    Play(play_cmd::PlayArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Play(args) => play_cmd::run(args),
    }
}
