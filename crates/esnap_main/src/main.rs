mod cli;
mod commands;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = commands::run(cli).await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Setting default subscriber failed");
}
