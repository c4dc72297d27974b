//! TLC Fetcher CLI application
//!
//! Command-line interface for downloading NYC TLC trip record data files.
//! Features concurrent downloads, parquet integrity validation, and
//! automatic cleanup of corrupt files.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tlc_fetcher::cli::{handle_download, handle_list, handle_sweep, Cli, Commands};
use tlc_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("TLC Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Download(args) => handle_download(&cli.global, args).await,
        Commands::Sweep(args) => handle_sweep(&cli.global, args).await,
        Commands::List(args) => handle_list(&cli.global, args).await,
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("tlc_fetcher={}", log_level).parse().unwrap());

    fmt().with_env_filter(filter).with_target(false).init();
}
