mod checkout;
mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compress {
            file,
            out_dir,
            no_save,
        } => commands::compress(commands::open_tracker(cli.store), &file, out_dir, no_save).await,
        Command::Status => commands::status(commands::open_tracker(cli.store)),
        Command::Subscribe { endpoint } => commands::subscribe(&endpoint).await,
    }
}
