//! reel CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use reel_cli::cli::Cli;
use reel_cli::commands;

fn main() {
    // Load .env if it exists (for REEL_DATA_FILE)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let data_file = cli.data_file();

    if let Err(e) = commands::execute(cli.command, &data_file) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
