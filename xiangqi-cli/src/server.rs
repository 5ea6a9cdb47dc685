//! Serve command - start the HTTP game server
//!
//! - run(): orchestration
//! - configure_server(), start_server(): phases
//! - validate_static_dir(): configuration check

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use xiangqi_server::history::DEFAULT_HISTORY_PATH;
use xiangqi_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "5000")]
    pub port: u16,

    /// Directory containing the front-end's static files
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    /// JSON file where finished games are recorded
    #[arg(long, value_name = "FILE", default_value = DEFAULT_HISTORY_PATH)]
    pub history_file: PathBuf,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run server command
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting Xiangqi server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        history_path: args.history_file.clone(),
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// STEPS
// ============================================================================

/// The front-end directory is optional; a path that points at a file is not
fn validate_static_dir(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if !meta.is_dir() => {
            anyhow::bail!("--static-dir {} is a file, expected a directory", path.display())
        }
        Ok(_) => Ok(()),
        Err(_) => {
            tracing::warn!(
                "No front-end at {}; only the /api routes will respond",
                path.display()
            );
            Ok(())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
