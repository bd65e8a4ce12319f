//! CLI module for Reframe
//!
//! This module handles command-line argument parsing and command execution.

use clap::Parser;

pub mod args;
pub mod commands;

/// Reframe batch converter
///
/// Converts 16:9 landscape videos to 9:16 portrait for short-form social
/// media, one file or a whole directory at a time.
#[derive(Parser, Debug)]
#[command(name = "reframe")]
#[command(about = "Reframe - Convert landscape videos to 9:16 portrait")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub convert: args::ConvertArgs,

    #[command(flatten)]
    pub logging: args::LoggingArgs,
}
