//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Async YouTube playlist reader
#[derive(Parser, Debug)]
#[command(name = "tubelist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show playlist metadata
    Info {
        /// Playlist URL
        url: String,
    },

    /// List video URLs, page by page
    Videos {
        /// Playlist URL
        url: String,

        /// Stop before this video id
        #[arg(long)]
        until: Option<String>,
    },

    /// Print the number of videos in the playlist
    Count {
        /// Playlist URL
        url: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
