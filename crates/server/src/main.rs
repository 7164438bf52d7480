//! Quill Server - HTTP gateway for the Quill writing assistant
//!
//! Configuration comes from `.env`, `quill.{toml,yaml,json}`, `QUILL__*`
//! environment variables and, with the highest precedence, command-line flags.

use clap::Parser;
use server::{Cli, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = ServerConfig::load_with_cli(&cli)?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
