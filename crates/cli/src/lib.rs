//! gosentry CLI library: exposed for integration tests

pub mod commands;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gosentry")]
#[command(about = "Single-pass lint for Go sources", long_about = None)]
#[command(version = gosentry_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory to scan (default: current directory)
    #[arg(long, global = true)]
    pub directory: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Don't list the imports of each file
    #[arg(long, global = true)]
    pub no_imports: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize .gosentry.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Sarif,
    Github,
}
