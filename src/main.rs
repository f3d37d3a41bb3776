//! train-harness binary.
//!
//! Loads layered YAML configuration, resolves the selected mode onto the
//! runner's settings, constructs the configured model, and trains it.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use train_harness::cli::{Cli, Command};
use train_harness::config::{ConfigLoader, ConfigPaths};
use train_harness::logging::Logger;
use train_harness::registry::ModelRegistry;
use train_harness::runner::TrainRunner;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let paths = match cli.config {
        Some(ref path) => ConfigPaths::with_explicit(path),
        None => ConfigPaths::discover(),
    };
    let loader = ConfigLoader::load_with_paths(paths)?;
    for path in loader.source_files() {
        info!("loaded configuration from {}", path.display());
    }
    let tree = loader.into_tree();

    let logger = Logger::new();
    let registry = ModelRegistry::builtin(logger.clone().with_name("registry"));

    match cli.command {
        Some(Command::Models) => {
            for name in registry.names() {
                println!("{name}");
            }
        }
        Some(Command::Modes) => {
            for mode in tree.mode_names() {
                println!("{mode}");
            }
        }
        Some(Command::Train) | None => {
            info!(
                "train-harness v{} starting (mode '{}')",
                env!("CARGO_PKG_VERSION"),
                cli.mode
            );
            let mut runner = TrainRunner::new(logger.with_name("runner"));
            runner.run(&tree, &cli.mode, &registry)?;
            info!("run complete");
        }
    }

    Ok(())
}
