//! CLI command definitions for train-harness
//!
//! This module defines the CLI structure using clap's derive macros. The
//! main entry point is the `Cli` struct; `train` is the default subcommand.

use clap::{Parser, Subcommand};

/// Config-driven training harness
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration mode to run ("default" applies no override layer)
    #[arg(short, long, default_value = "default", global = true)]
    pub mode: String,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve configuration and train the selected model (default if no
    /// subcommand given)
    Train,

    /// List the models the registry can construct
    Models,

    /// List the modes present in the loaded configuration
    Modes,
}
