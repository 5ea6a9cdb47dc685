//! Example to run the Xiangqi server standalone
//!
//! Run with: cargo run -p xiangqi-server --example run_server

use tracing_subscriber::EnvFilter;
use xiangqi_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::default();

    println!("Starting Xiangqi server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Open http://localhost:{}/", config.port);

    run_server(config).await
}
