//! CLI module
//!
//! Command-line interface for reading playlists.
//!
//! # Commands
//!
//! - `info` - Show playlist metadata
//! - `videos` - List video URLs page by page, optionally stopping at a video id
//! - `count` - Print the number of videos

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
