use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pitchcraft::config::{Config, DEFAULT_LOG_FILTER, RuntimeConfig};

mod cli;
mod http;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so generated text on stdout stays clean
    let runtime = RuntimeConfig::load_from_env();
    let filter = EnvFilter::try_new(&runtime.log_level).unwrap_or_else(|_| {
        eprintln!("Ignoring invalid RUST_LOG '{}'", runtime.log_level);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    match args.command {
        cli::Command::Serve { bind } => http::start_http_server(config, bind).await,
        command => cli::run(command, &config).await,
    }
}
