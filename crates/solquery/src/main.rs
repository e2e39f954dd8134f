use clap::Parser;
use eyre::Context as _;
use tracing_subscriber::prelude::*;

mod chain;
mod config;
mod errors;
mod mcp_server;

/// Read-only Solana ledger queries exposed as an MCP stdio server.
///
/// The agent host speaks newline-delimited JSON-RPC over stdin/stdout;
/// diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "solquery", version)]
struct Cli;

fn init_logging() {
    // Stdout is the data channel; all diagnostics go to stderr.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_e| tracing_subscriber::EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(stderr_layer).init();
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let _cli = Cli::parse();
    init_logging();
    mcp_server::run().await.context("mcp server failed")
}
