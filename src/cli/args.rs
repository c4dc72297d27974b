//! Command-line argument parsing for TLC Fetcher
//!
//! This module defines the CLI structure using clap derive macros,
//! providing a user-friendly interface for URL discovery, concurrent
//! downloading, and store cleanup.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// TLC Fetcher - Download NYC TLC trip record data
#[derive(Parser, Debug)]
#[command(
    name = "tlc_fetcher",
    version,
    about = "Download NYC TLC trip record parquet files efficiently",
    long_about = "A tool for downloading NYC Taxi & Limousine Commission trip record data.
Discovers dataset URLs from the TLC landing page, downloads them concurrently,
and removes any file that fails parquet structural validation."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (trace level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover, download, and validate dataset files
    Download(DownloadArgs),

    /// Validate resident files and delete corrupt ones
    Sweep(SweepArgs),

    /// Discover dataset URLs and print them
    List(ListArgs),
}

/// Arguments for the download command
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Directory to store downloaded files in
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Number of concurrent downloads
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Page to scrape for dataset links
    #[arg(long, value_name = "URL")]
    pub page_url: Option<String>,

    /// Skip scraping and replay a previously persisted URL list
    #[arg(long, value_name = "FILE", conflicts_with = "page_url")]
    pub urls_file: Option<PathBuf>,

    /// Maximum number of files to download (for testing)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Skip the post-download validation sweep
    #[arg(long)]
    pub skip_sweep: bool,
}

/// Arguments for the sweep command
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Directory holding the downloaded files
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Page to scrape for dataset links
    #[arg(long, value_name = "URL")]
    pub page_url: Option<String>,

    /// Also persist the discovered list to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level implied by the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.global.very_verbose {
            "trace"
        } else if self.global.verbose {
            "debug"
        } else if self.global.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
