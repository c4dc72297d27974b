//! Command-line interface components
//!
//! This module contains CLI-specific code for the TLC Fetcher application,
//! including argument parsing and command handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DownloadArgs, GlobalArgs, ListArgs, SweepArgs};
pub use commands::{handle_download, handle_list, handle_sweep};
